use crate::lease::status::{classify, ResponseClass, CONTENT_TYPE_PROTOBUF, LEASE_INTERNAL_PREFIX, LEASE_PREFIX};
use crate::lease::{
    LeaseId, MessageError, RenewRequest, RenewResponse, RoundTripper, TimeToLiveRequest, TimeToLiveResponse,
    TransportError,
};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, Response};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum LeaseClientError {
    #[error("lease not found")]
    NotFound,
    #[error("waiting for node to catch up its applied index has timed out")]
    HttpTimeout,
    #[error("lease: unknown error({0})")]
    Unknown(String),
    #[error("lease: renew id mismatch (requested {requested:?}, received {received:?})")]
    IdMismatch { requested: LeaseId, received: LeaseId },
    #[error("lease: {source}. data = {data:?}")]
    Decode { source: MessageError, data: String },
    #[error("lease: failed to encode request: {0}")]
    Encode(#[source] prost::EncodeError),
    #[error("lease: invalid request: {0}")]
    InvalidRequest(#[source] http::Error),
    #[error("lease: {0}")]
    Transport(#[source] TransportError),
    #[error("lease: request canceled")]
    Canceled,
}

/// LeaseForwardClient is what a follower uses to have the leader renew or inspect a lease.
///
/// `leader_url` is the leader's peer URL (scheme, host and port); the lease paths are appended
/// here.
pub struct LeaseForwardClient<T: ?Sized> {
    logger: slog::Logger,
    transport: Arc<T>,
}

impl<T> LeaseForwardClient<T>
where
    T: RoundTripper + ?Sized + 'static,
{
    pub fn new(logger: slog::Logger, transport: Arc<T>) -> Self {
        LeaseForwardClient { logger, transport }
    }

    /// Renews a lease at the leader and returns the new TTL in seconds. Cancelling drops the
    /// in-flight request.
    pub async fn renew(&self, cancel: &CancellationToken, id: LeaseId, leader_url: &str) -> Result<i64, LeaseClientError> {
        let body = RenewRequest { lease_id: id }.encode().map_err(LeaseClientError::Encode)?;
        let request = build_request(&format!("{}{}", leader_url, LEASE_PREFIX), body)?;

        slog::debug!(self.logger, "ClientWire - renew {:?} at {}", id, leader_url);
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LeaseClientError::Canceled),
            result = self.transport.round_trip(request) => result.map_err(LeaseClientError::Transport)?,
        };
        slog::debug!(self.logger, "ClientWire - renew {:?} status {}", id, response.status());

        let body = check_status(&response)?;
        let reply = RenewResponse::decode(body).map_err(|e| decode_error(e, body))?;
        if reply.lease_id != id {
            return Err(LeaseClientError::IdMismatch {
                requested: id,
                received: reply.lease_id,
            });
        }

        Ok(reply.ttl)
    }

    /// Looks up a lease's remaining and granted TTL at the leader, optionally with its keys.
    ///
    /// The transmission runs as its own task. If `cancel` fires first, the task is aborted and
    /// awaited before returning, so no request outlives the call.
    pub async fn time_to_live(
        &self,
        cancel: &CancellationToken,
        id: LeaseId,
        include_keys: bool,
        leader_url: &str,
    ) -> Result<TimeToLiveResponse, LeaseClientError> {
        let body = TimeToLiveRequest {
            lease_id: id,
            include_keys,
        }
        .encode()
        .map_err(LeaseClientError::Encode)?;
        let request = build_request(&format!("{}{}", leader_url, LEASE_INTERNAL_PREFIX), body)?;

        slog::debug!(self.logger, "ClientWire - time-to-live {:?} at {}", id, leader_url);
        let (done_tx, done_rx) = oneshot::channel();
        let transport = self.transport.clone();
        let mut transmission = tokio::spawn(async move {
            let result = transport.round_trip(request).await;
            let _ = done_tx.send(result);
        });

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                transmission.abort();
                let _ = (&mut transmission).await;
                slog::debug!(self.logger, "ClientWire - time-to-live {:?} canceled", id);
                return Err(LeaseClientError::Canceled);
            }
            done = done_rx => done,
        };
        let response = match result {
            Ok(r) => r.map_err(LeaseClientError::Transport)?,
            // Sender dropped without sending: the task panicked.
            Err(_) => return Err(LeaseClientError::Transport(TransportError::Interrupted)),
        };
        slog::debug!(self.logger, "ClientWire - time-to-live {:?} status {}", id, response.status());

        let body = check_status(&response)?;
        let reply = TimeToLiveResponse::decode(body).map_err(|e| decode_error(e, body))?;
        if reply.lease_id != id {
            return Err(LeaseClientError::IdMismatch {
                requested: id,
                received: reply.lease_id,
            });
        }

        Ok(reply)
    }
}

fn build_request(url: &str, body: Vec<u8>) -> Result<Request<Bytes>, LeaseClientError> {
    Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, CONTENT_TYPE_PROTOBUF)
        .body(Bytes::from(body))
        .map_err(LeaseClientError::InvalidRequest)
}

/// Returns the body of a successful response, or the typed error for the status.
fn check_status(response: &Response<Bytes>) -> Result<&[u8], LeaseClientError> {
    match classify(response.status()) {
        ResponseClass::Success => Ok(response.body()),
        ResponseClass::ApplyTimeout => Err(LeaseClientError::HttpTimeout),
        ResponseClass::LeaseNotFound => Err(LeaseClientError::NotFound),
        ResponseClass::Failure => Err(LeaseClientError::Unknown(
            String::from_utf8_lossy(response.body()).into_owned(),
        )),
    }
}

fn decode_error(source: MessageError, body: &[u8]) -> LeaseClientError {
    LeaseClientError::Decode {
        source,
        data: String::from_utf8_lossy(body).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lease::ResponseHeader;
    use http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use tokio::time::Duration;

    fn test_logger() -> slog::Logger {
        slog::Logger::root(slog::Discard, slog::o!())
    }

    /// Replies with a canned response, or hangs until released when `hang` is set. Tracks how many
    /// transmissions are in flight; a transmission dropped mid-flight still decrements.
    #[derive(Default)]
    struct FakeTransport {
        reply: Mutex<Option<(StatusCode, Vec<u8>)>>,
        hang: bool,
        release: Notify,
        outstanding: Arc<AtomicUsize>,
        started: Notify,
        seen_paths: Mutex<Vec<String>>,
    }

    struct OutstandingGuard(Arc<AtomicUsize>);

    impl Drop for OutstandingGuard {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl FakeTransport {
        fn replying(status: StatusCode, body: Vec<u8>) -> Self {
            FakeTransport {
                reply: Mutex::new(Some((status, body))),
                ..FakeTransport::default()
            }
        }

        fn hanging() -> Self {
            FakeTransport {
                hang: true,
                ..FakeTransport::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl RoundTripper for FakeTransport {
        async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
            self.outstanding.fetch_add(1, Ordering::SeqCst);
            let _guard = OutstandingGuard(self.outstanding.clone());
            self.seen_paths.lock().unwrap().push(request.uri().path().to_string());
            assert_eq!(request.method(), Method::POST);
            self.started.notify_one();

            if self.hang {
                self.release.notified().await;
            }

            match self.reply.lock().unwrap().clone() {
                Some((status, body)) => {
                    let mut response = Response::new(Bytes::from(body));
                    *response.status_mut() = status;
                    Ok(response)
                }
                None => Err(TransportError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }

    fn client(transport: FakeTransport) -> (LeaseForwardClient<FakeTransport>, Arc<FakeTransport>) {
        let transport = Arc::new(transport);
        (LeaseForwardClient::new(test_logger(), transport.clone()), transport)
    }

    fn renew_reply(id: i64, ttl: i64) -> Vec<u8> {
        RenewResponse {
            header: ResponseHeader::default(),
            lease_id: LeaseId::new(id),
            ttl,
        }
        .encode()
        .unwrap()
    }

    fn ttl_reply(id: i64) -> Vec<u8> {
        TimeToLiveResponse {
            header: ResponseHeader::default(),
            lease_id: LeaseId::new(id),
            ttl: 10,
            granted_ttl: 30,
            keys: vec![b"k".to_vec()],
        }
        .encode()
        .unwrap()
    }

    #[tokio::test]
    async fn renew_success() {
        let (c, transport) = client(FakeTransport::replying(StatusCode::OK, renew_reply(5, 60)));

        let ttl = c.renew(&CancellationToken::new(), LeaseId::new(5), "http://leader").await.unwrap();

        assert_eq!(ttl, 60);
        assert_eq!(*transport.seen_paths.lock().unwrap(), vec![LEASE_PREFIX.to_string()]);
    }

    #[tokio::test]
    async fn renew_status_mapping() {
        let cases = vec![
            (StatusCode::NOT_FOUND, "lease not found"),
            (StatusCode::REQUEST_TIMEOUT, "timed out"),
            (StatusCode::BAD_REQUEST, "lease expired"),
            (StatusCode::INTERNAL_SERVER_ERROR, "boom"),
        ];

        for (status, body) in cases {
            let (c, _) = client(FakeTransport::replying(status, body.as_bytes().to_vec()));
            let err = c
                .renew(&CancellationToken::new(), LeaseId::new(5), "http://leader")
                .await
                .unwrap_err();

            match (status, err) {
                (StatusCode::NOT_FOUND, LeaseClientError::NotFound) => {}
                (StatusCode::REQUEST_TIMEOUT, LeaseClientError::HttpTimeout) => {}
                (StatusCode::BAD_REQUEST, LeaseClientError::Unknown(msg)) => assert_eq!(msg, "lease expired"),
                (StatusCode::INTERNAL_SERVER_ERROR, LeaseClientError::Unknown(msg)) => assert_eq!(msg, "boom"),
                (status, err) => panic!("status {} mapped to unexpected error {:?}", status, err),
            }
        }
    }

    #[tokio::test]
    async fn renew_id_mismatch_is_rejected() {
        let (c, _) = client(FakeTransport::replying(StatusCode::OK, renew_reply(6, 60)));

        let err = c
            .renew(&CancellationToken::new(), LeaseId::new(5), "http://leader")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaseClientError::IdMismatch { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn renew_undecodable_body() {
        let (c, _) = client(FakeTransport::replying(StatusCode::OK, vec![0xff, 0xff, 0xff]));

        let err = c
            .renew(&CancellationToken::new(), LeaseId::new(5), "http://leader")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaseClientError::Decode { .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn time_to_live_reply_without_inner_message() {
        let (c, _) = client(FakeTransport::replying(StatusCode::OK, Vec::new()));

        let err = c
            .time_to_live(&CancellationToken::new(), LeaseId::new(9), false, "http://leader")
            .await
            .unwrap_err();

        match err {
            LeaseClientError::Decode {
                source: MessageError::Missing(field),
                ..
            } => assert_eq!(field, "lease_time_to_live_response"),
            other => panic!("Unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn renew_transport_failure_is_surfaced() {
        let (c, _) = client(FakeTransport::default());

        let err = c
            .renew(&CancellationToken::new(), LeaseId::new(5), "http://leader")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaseClientError::Transport(TransportError::Io(_))), "{:?}", err);
    }

    #[tokio::test]
    async fn renew_cancel_drops_request() {
        let (c, transport) = client(FakeTransport::hanging());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        let watcher = transport.clone();
        tokio::spawn(async move {
            watcher.started.notified().await;
            canceller.cancel();
        });

        let err = c.renew(&cancel, LeaseId::new(5), "http://leader").await.unwrap_err();

        assert!(matches!(err, LeaseClientError::Canceled), "{:?}", err);
        assert_eq!(transport.outstanding.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn time_to_live_success() {
        let (c, transport) = client(FakeTransport::replying(StatusCode::OK, ttl_reply(9)));

        let reply = c
            .time_to_live(&CancellationToken::new(), LeaseId::new(9), true, "http://leader")
            .await
            .unwrap();

        assert_eq!(reply.ttl, 10);
        assert_eq!(reply.granted_ttl, 30);
        assert_eq!(reply.keys, vec![b"k".to_vec()]);
        assert_eq!(*transport.seen_paths.lock().unwrap(), vec![LEASE_INTERNAL_PREFIX.to_string()]);
    }

    #[tokio::test]
    async fn time_to_live_id_mismatch_and_not_found() {
        let (c, _) = client(FakeTransport::replying(StatusCode::OK, ttl_reply(10)));
        let err = c
            .time_to_live(&CancellationToken::new(), LeaseId::new(9), false, "http://leader")
            .await
            .unwrap_err();
        assert!(matches!(err, LeaseClientError::IdMismatch { .. }), "{:?}", err);

        let (c, _) = client(FakeTransport::replying(StatusCode::NOT_FOUND, b"lease not found".to_vec()));
        let err = c
            .time_to_live(&CancellationToken::new(), LeaseId::new(9), false, "http://leader")
            .await
            .unwrap_err();
        assert!(matches!(err, LeaseClientError::NotFound), "{:?}", err);
    }

    #[tokio::test]
    async fn time_to_live_cancel_leaves_nothing_in_flight() {
        let (c, transport) = client(FakeTransport::hanging());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        let watcher = transport.clone();
        tokio::spawn(async move {
            watcher.started.notified().await;
            assert_eq!(watcher.outstanding.load(Ordering::SeqCst), 1);
            canceller.cancel();
        });

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            c.time_to_live(&cancel, LeaseId::new(9), true, "http://leader"),
        )
        .await
        .expect("cancel should end the call")
        .unwrap_err();

        assert!(matches!(err, LeaseClientError::Canceled), "{:?}", err);
        assert_eq!(transport.outstanding.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn already_canceled_call_never_succeeds() {
        let (c, _) = client(FakeTransport::replying(StatusCode::OK, ttl_reply(9)));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = c
            .time_to_live(&cancel, LeaseId::new(9), true, "http://leader")
            .await
            .unwrap_err();

        assert!(matches!(err, LeaseClientError::Canceled), "{:?}", err);
    }
}
