use crate::api::options::{KvClientOptionsValidated, LeaseServerOptionsValidated};
use crate::apply::ApplyGate;
use crate::kv::{ConnectError, GrpcKvRemote, Kv};
use crate::lease::{bind_listener, HeaderFiller, LeaseHandler, LeaseHttpServer, Lessor, RaftStatus};
use crate::server::{self, ShutdownHandle};
use crate::{KvClientOptions, LeaseServerOptions};
use std::convert::TryFrom;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct LeaseServerConfig<L, G> {
    /// Port 0 picks a free port; read the real one from `LeaseServerHandle::local_addr`.
    pub socket_addr: SocketAddr,
    pub cluster_id: u64,
    pub member_id: u64,
    pub lessor: L,
    pub apply_gate: G,
    pub raft_status: Arc<dyn RaftStatus>,
    pub info_logger: slog::Logger,
    pub options: LeaseServerOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum LeaseServerStartError {
    #[error("Illegal options for configuring lease server: {0}")]
    IllegalOptions(String),
    #[error("Failed to bind lease server socket")]
    Bind(#[source] hyper::Error),
}

/// LeaseServerHandle keeps the lease server running. Dropping it shuts the server down without
/// waiting; `shutdown()` waits for in-flight requests to drain.
pub struct LeaseServerHandle {
    local_addr: SocketAddr,
    shutdown_handle: ShutdownHandle,
    server_task: JoinHandle<()>,
}

impl LeaseServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL for `LeaseForwardClient` calls against this server.
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    pub async fn shutdown(self) {
        self.shutdown_handle.shutdown();
        let _ = self.server_task.await;
    }
}

pub async fn try_start_lease_server<L, G>(
    config: LeaseServerConfig<L, G>,
) -> Result<LeaseServerHandle, LeaseServerStartError>
where
    L: Lessor + 'static,
    G: ApplyGate + 'static,
{
    let root_logger = config.info_logger;

    let options = LeaseServerOptionsValidated::try_from(config.options)
        .map_err(|e| LeaseServerStartError::IllegalOptions(e.to_string()))?;

    let incoming = bind_listener(config.socket_addr).map_err(LeaseServerStartError::Bind)?;
    let local_addr = incoming.local_addr();

    let header = HeaderFiller::new(config.cluster_id, config.member_id, config.raft_status);
    let handler = LeaseHandler::new(
        root_logger.clone(),
        config.lessor,
        config.apply_gate,
        header,
        options.apply_timeout,
    );

    let (shutdown_handle, shutdown_signal) = server::shutdown_signal();
    let lease_server = LeaseHttpServer::new(root_logger, handler);
    let server_task = tokio::spawn(lease_server.run(incoming, shutdown_signal));

    Ok(LeaseServerHandle {
        local_addr,
        shutdown_handle,
        server_task,
    })
}

pub struct KvClientConfig {
    /// gRPC endpoint of the key-value service, e.g. `http://127.0.0.1:2379`.
    pub endpoint: String,
    pub info_logger: slog::Logger,
    pub options: KvClientOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum KvClientCreationError {
    #[error("Illegal options for configuring client: {0}")]
    IllegalClientOptions(String),
    #[error("Failed to connect to key-value endpoint")]
    Connect(#[source] ConnectError),
}

pub async fn try_create_kv_client(config: KvClientConfig) -> Result<Kv<GrpcKvRemote>, KvClientCreationError> {
    let options = KvClientOptionsValidated::try_from(config.options)
        .map_err(|e| KvClientCreationError::IllegalClientOptions(e.to_string()))?;

    slog::info!(config.info_logger, "Connecting to key-value endpoint {}", config.endpoint);
    let remote = GrpcKvRemote::connect(config.endpoint, options.request_timeout)
        .await
        .map_err(KvClientCreationError::Connect)?;

    Ok(Kv::new(config.info_logger, remote, options.retry))
}
