mod api;
mod apply;
mod cluster;
mod kv;
mod lease;
mod server;
mod grpc {
    include!("../generated/kvcoord.rs");
}

pub use api::try_create_kv_client;
pub use api::try_start_lease_server;
pub use api::KvClientConfig;
pub use api::KvClientCreationError;
pub use api::KvClientOptions;
pub use api::LeaseServerConfig;
pub use api::LeaseServerHandle;
pub use api::LeaseServerOptions;
pub use api::LeaseServerStartError;
pub use api::RetryOptions;
pub use apply::notifier;
pub use apply::ApplyGate;
pub use apply::ApplyWait;
pub use apply::ApplyWaitError;
pub use apply::CommittedIndexGate;
pub use apply::Notifier;
pub use apply::NotifierWaiter;
pub use cluster::ConnectivityOracle;
pub use cluster::MemberInfo;
pub use cluster::PeerActivity;
pub use cluster::PeerActivityTable;
pub use cluster::ReplicaId;
pub use kv::is_halt_error;
pub use kv::CallOptions;
pub use kv::Clock;
pub use kv::CompactResponse;
pub use kv::Compare;
pub use kv::CompareResult;
pub use kv::CompareTarget;
pub use kv::ConnectError;
pub use kv::DeleteRangeOp;
pub use kv::DeleteResponse;
pub use kv::GetResponse;
pub use kv::GrpcKvRemote;
pub use kv::KeyValue;
pub use kv::Kv;
pub use kv::KvError;
pub use kv::KvRemote;
pub use kv::Op;
pub use kv::OpResponse;
pub use kv::PutOp;
pub use kv::PutResponse;
pub use kv::RangeOp;
pub use kv::RealClock;
pub use kv::RetryPolicy;
pub use kv::TxnBranchOp;
pub use kv::TxnOp;
pub use kv::TxnResponse;
pub use lease::HeaderFiller;
pub use lease::HyperRoundTripper;
pub use lease::InMemoryLessor;
pub use lease::Lease;
pub use lease::LeaseClientError;
pub use lease::LeaseError;
pub use lease::LeaseForwardClient;
pub use lease::LeaseHandler;
pub use lease::LeaseId;
pub use lease::Lessor;
pub use lease::MessageError;
pub use lease::RaftStatus;
pub use lease::RenewRequest;
pub use lease::RenewResponse;
pub use lease::ResponseHeader;
pub use lease::RoundTripper;
pub use lease::TimeToLiveRequest;
pub use lease::TimeToLiveResponse;
pub use lease::TransportError;
pub use lease::DEFAULT_APPLY_TIMEOUT;
pub use lease::LEASE_INTERNAL_PREFIX;
pub use lease::LEASE_PREFIX;

// The crate root only declares modules and re-exports. All `mod` statements stay private; the
// public surface is exactly the `pub use` list above.
