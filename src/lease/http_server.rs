use crate::apply::{ApplyGate, ApplyWaitError};
use crate::lease::status::{
    ForwardOutcome, APPLY_TIMEOUT_MESSAGE, CONTENT_TYPE_PROTOBUF, LEASE_INTERNAL_PREFIX, LEASE_PREFIX,
};
use crate::lease::{
    HeaderFiller, LeaseError, Lessor, MessageError, RenewRequest, RenewResponse, ResponseHeader, TimeToLiveRequest,
    TimeToLiveResponse,
};
use crate::server::ShutdownSignal;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Method, Request, Response};
use hyper::server::conn::AddrIncoming;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Server};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::Duration;

/// Time a forwarded request may wait for the local node to catch up before it is refused.
pub const DEFAULT_APPLY_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
enum LeaseHandlerError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("unknown request path {0:?}")]
    UnknownPath(String),
    #[error("error unmarshalling request")]
    Unmarshal(#[source] MessageError),
    #[error("{}", APPLY_TIMEOUT_MESSAGE)]
    ApplyTimeout,
    #[error("{0}")]
    Gate(ApplyWaitError),
    #[error("{0}")]
    Lessor(LeaseError),
    #[error("{0}")]
    Encode(prost::EncodeError),
}

impl LeaseHandlerError {
    fn outcome(&self) -> ForwardOutcome {
        match self {
            LeaseHandlerError::MethodNotAllowed => ForwardOutcome::MethodNotAllowed,
            LeaseHandlerError::UnknownPath(_) | LeaseHandlerError::Unmarshal(_) => ForwardOutcome::MalformedRequest,
            LeaseHandlerError::ApplyTimeout => ForwardOutcome::ApplyTimeout,
            LeaseHandlerError::Gate(_) => ForwardOutcome::ServerStopped,
            LeaseHandlerError::Lessor(LeaseError::NotFound) => ForwardOutcome::LeaseNotFound,
            LeaseHandlerError::Lessor(_) => ForwardOutcome::ExecutionFailed,
            LeaseHandlerError::Encode(_) => ForwardOutcome::EncodeFailed,
        }
    }
}

/// LeaseHandler serves lease renewals and time-to-live lookups forwarded by followers.
///
/// Each request goes through decode, gate, execute and encode strictly in that order. The gate
/// holds the request until the local node has applied what the follower may have already seen;
/// if that takes longer than the apply timeout the request is refused without touching the
/// lessor.
pub struct LeaseHandler<L, G> {
    logger: slog::Logger,
    lessor: L,
    gate: G,
    header: HeaderFiller,
    apply_timeout: Duration,
}

impl<L, G> LeaseHandler<L, G>
where
    L: Lessor,
    G: ApplyGate,
{
    pub fn new(logger: slog::Logger, lessor: L, gate: G, header: HeaderFiller, apply_timeout: Duration) -> Self {
        LeaseHandler {
            logger,
            lessor,
            gate,
            header,
            apply_timeout,
        }
    }

    pub async fn handle(&self, request: Request<Bytes>) -> Response<Bytes> {
        slog::debug!(self.logger, "ServerWire - {} {}", request.method(), request.uri().path());
        let result = self.try_handle(&request).await;

        match result {
            Ok(body) => {
                slog::debug!(self.logger, "ServerWire - {} ok", request.uri().path());
                let mut response = Response::new(Bytes::from(body));
                *response.status_mut() = ForwardOutcome::Success.status_code();
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_PROTOBUF));
                response
            }
            Err(e) => {
                let outcome = e.outcome();
                match outcome {
                    ForwardOutcome::ApplyTimeout | ForwardOutcome::ServerStopped | ForwardOutcome::EncodeFailed => {
                        slog::warn!(self.logger, "Lease request {} failed: {}", request.uri().path(), e)
                    }
                    _ => slog::debug!(self.logger, "Lease request {} failed: {}", request.uri().path(), e),
                }
                error_response(outcome, e.to_string())
            }
        }
    }

    async fn try_handle(&self, request: &Request<Bytes>) -> Result<Vec<u8>, LeaseHandlerError> {
        if request.method() != Method::POST {
            return Err(LeaseHandlerError::MethodNotAllowed);
        }

        match request.uri().path() {
            LEASE_PREFIX => self.handle_renew(request.body()).await,
            LEASE_INTERNAL_PREFIX => self.handle_time_to_live(request.body()).await,
            path => Err(LeaseHandlerError::UnknownPath(path.to_string())),
        }
    }

    async fn handle_renew(&self, body: &[u8]) -> Result<Vec<u8>, LeaseHandlerError> {
        let request = RenewRequest::decode(body).map_err(LeaseHandlerError::Unmarshal)?;

        self.wait_for_applied().await?;

        let ttl = self.lessor.renew(request.lease_id).map_err(LeaseHandlerError::Lessor)?;

        let mut response = RenewResponse {
            header: ResponseHeader::default(),
            lease_id: request.lease_id,
            ttl,
        };
        self.header.fill(&mut response.header);

        response.encode().map_err(LeaseHandlerError::Encode)
    }

    async fn handle_time_to_live(&self, body: &[u8]) -> Result<Vec<u8>, LeaseHandlerError> {
        let request = TimeToLiveRequest::decode(body).map_err(LeaseHandlerError::Unmarshal)?;

        self.wait_for_applied().await?;

        let lease = self
            .lessor
            .lookup(request.lease_id)
            .ok_or(LeaseHandlerError::Lessor(LeaseError::NotFound))?;

        let keys = if request.include_keys {
            lease.keys().iter().map(|k| k.as_bytes().to_vec()).collect()
        } else {
            Vec::new()
        };

        let mut response = TimeToLiveResponse {
            header: ResponseHeader::default(),
            lease_id: request.lease_id,
            ttl: lease.remaining().as_secs() as i64,
            granted_ttl: lease.ttl(),
            keys,
        };
        self.header.fill(&mut response.header);

        response.encode().map_err(LeaseHandlerError::Encode)
    }

    async fn wait_for_applied(&self) -> Result<(), LeaseHandlerError> {
        match tokio::time::timeout(self.apply_timeout, self.gate.wait_for_applied()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(LeaseHandlerError::Gate(e)),
            Err(_elapsed) => Err(LeaseHandlerError::ApplyTimeout),
        }
    }
}

fn error_response(outcome: ForwardOutcome, message: String) -> Response<Bytes> {
    let mut response = Response::new(Bytes::from(message));
    *response.status_mut() = outcome.status_code();
    response
}

/// Binds the listening socket up front so the caller learns about an unavailable port (and the
/// real port when asking for port 0) before the server task is spawned.
pub fn bind_listener(socket_addr: SocketAddr) -> Result<AddrIncoming, hyper::Error> {
    AddrIncoming::bind(&socket_addr)
}

/// LeaseHttpServer exposes a `LeaseHandler` over HTTP.
pub struct LeaseHttpServer<L, G> {
    logger: slog::Logger,
    handler: Arc<LeaseHandler<L, G>>,
}

impl<L, G> LeaseHttpServer<L, G>
where
    L: Lessor + 'static,
    G: ApplyGate + 'static,
{
    pub fn new(logger: slog::Logger, handler: LeaseHandler<L, G>) -> Self {
        LeaseHttpServer {
            logger,
            handler: Arc::new(handler),
        }
    }

    pub async fn run(self, incoming: AddrIncoming, shutdown_signal: ShutdownSignal) {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", incoming.local_addr());

        let handler = self.handler;
        let service_logger = self.logger;
        let make_service = make_service_fn(move |_conn| {
            let handler = handler.clone();
            let logger = service_logger.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let handler = handler.clone();
                    let logger = logger.clone();
                    async move { Ok::<_, Infallible>(serve_hyper_request(&logger, &handler, request).await) }
                }))
            }
        });

        let result = Server::builder(incoming)
            .serve(make_service)
            .with_graceful_shutdown(shutdown_signal)
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }
}

async fn serve_hyper_request<L, G>(
    logger: &slog::Logger,
    handler: &LeaseHandler<L, G>,
    request: Request<Body>,
) -> Response<Body>
where
    L: Lessor,
    G: ApplyGate,
{
    let (parts, body) = request.into_parts();
    let response = match hyper::body::to_bytes(body).await {
        Ok(bytes) => handler.handle(Request::from_parts(parts, bytes)).await,
        Err(e) => {
            slog::warn!(logger, "Failed to read request body: {:?}", e);
            error_response(ForwardOutcome::MalformedRequest, "error reading body".to_string())
        }
    };

    response.map(Body::from)
}
