use bytes::Bytes;
use http::{Request, Response};
use hyper::client::HttpConnector;
use hyper::{Body, Client};
use std::io;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("http transport failure: {0}")]
    Hyper(#[from] hyper::Error),
    #[error("io failure: {0}")]
    Io(#[from] io::Error),
    #[error("transmission task ended without reporting a result")]
    Interrupted,
}

/// RoundTripper sends one HTTP request and hands back the complete response.
#[async_trait::async_trait]
pub trait RoundTripper: Send + Sync {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError>;
}

#[async_trait::async_trait]
impl<T: RoundTripper + ?Sized> RoundTripper for Arc<T> {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        (**self).round_trip(request).await
    }
}

/// HyperRoundTripper is the plain HTTP/1.1 implementation. The hyper client pools connections
/// per host internally.
#[derive(Clone)]
pub struct HyperRoundTripper {
    client: Client<HttpConnector, Body>,
}

impl HyperRoundTripper {
    pub fn new() -> Self {
        HyperRoundTripper { client: Client::new() }
    }
}

impl Default for HyperRoundTripper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RoundTripper for HyperRoundTripper {
    async fn round_trip(&self, request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
        let (parts, body) = request.into_parts();
        let response = self.client.request(Request::from_parts(parts, Body::from(body))).await?;

        // Drain the whole body so the connection can go back to the pool.
        let (parts, body) = response.into_parts();
        let body = hyper::body::to_bytes(body).await?;

        Ok(Response::from_parts(parts, body))
    }
}
