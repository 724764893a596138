use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Response body, delivered chunk by chunk so it never has to be held in memory at once.
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

pub struct TransportResponse {
    pub status: StatusCode,
    pub body: BodyStream,
}

impl TransportResponse {
    /// Status line text such as `404 Not Found`.
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Issues a single HTTP GET. Implementations must not retry.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("imgfetch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        tracing::trace!(url = %url, "Sending GET request");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response
            .bytes_stream()
            .map_err(TransportError::from)
            .boxed();

        Ok(TransportResponse { status, body })
    }
}
