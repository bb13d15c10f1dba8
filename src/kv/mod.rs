mod clock;
mod error;
#[allow(clippy::module_inception)]
mod kv;
mod op;
mod remote;
mod response;
mod retry;

pub use clock::Clock;
pub use clock::RealClock;
pub use error::is_halt_error;
pub use error::KvError;
pub use kv::Kv;
pub use op::Compare;
pub use op::CompareResult;
pub use op::CompareTarget;
pub use op::DeleteRangeOp;
pub use op::Op;
pub use op::PutOp;
pub use op::RangeOp;
pub use op::TxnBranchOp;
pub use op::TxnOp;
pub use remote::CallOptions;
pub use remote::ConnectError;
pub use remote::GrpcKvRemote;
pub use remote::KvRemote;
pub use response::CompactResponse;
pub use response::DeleteResponse;
pub use response::GetResponse;
pub use response::KeyValue;
pub use response::OpResponse;
pub use response::PutResponse;
pub use response::TxnResponse;
pub use retry::RetryPolicy;
