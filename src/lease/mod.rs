mod header;
mod http_client;
mod http_server;
mod in_memory;
mod lessor;
mod messages;
mod round_tripper;
mod status;

pub use header::HeaderFiller;
pub use header::RaftStatus;
pub use http_client::LeaseClientError;
pub use http_client::LeaseForwardClient;
pub use http_server::bind_listener;
pub use http_server::LeaseHandler;
pub use http_server::LeaseHttpServer;
pub use http_server::DEFAULT_APPLY_TIMEOUT;
pub use in_memory::InMemoryLessor;
pub use lessor::Lease;
pub use lessor::LeaseError;
pub use lessor::LeaseId;
pub use lessor::Lessor;
pub use messages::MessageError;
pub use messages::RenewRequest;
pub use messages::RenewResponse;
pub use messages::ResponseHeader;
pub use messages::TimeToLiveRequest;
pub use messages::TimeToLiveResponse;
pub use round_tripper::HyperRoundTripper;
pub use round_tripper::RoundTripper;
pub use round_tripper::TransportError;
pub use status::LEASE_INTERNAL_PREFIX;
pub use status::LEASE_PREFIX;
