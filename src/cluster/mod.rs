mod activity;
mod connectivity;
mod peers;

pub use activity::PeerActivity;
pub use activity::PeerActivityTable;
pub use connectivity::ConnectivityOracle;
pub use peers::MemberInfo;
pub use peers::ReplicaId;
