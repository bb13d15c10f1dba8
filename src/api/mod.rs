//! Entry points that assemble the lease server and the key-value client from plain config.
mod options;
mod wiring;

pub use options::KvClientOptions;
pub use options::LeaseServerOptions;
pub use options::RetryOptions;
pub use wiring::try_create_kv_client;
pub use wiring::try_start_lease_server;
pub use wiring::KvClientConfig;
pub use wiring::KvClientCreationError;
pub use wiring::LeaseServerConfig;
pub use wiring::LeaseServerHandle;
pub use wiring::LeaseServerStartError;
