//! Pluggable HTTP transport used by the dispatcher and the file downloader.
//!
//! The default implementation is [`ReqwestTransport`]. Applications can supply
//! their own [`Transport`] (proxies, test doubles, custom TLS) through
//! [`crate::BotClientBuilder::transport`].

pub mod http;

pub use http::ReqwestTransport;

use crate::requests::RequestBody;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::Method;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Response body as a stream of chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send + 'static>>;

/// How much of the response the transport should read before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Read the whole body before completing.
    #[default]
    Buffered,
    /// Complete as soon as the headers arrive; the body is streamed afterwards.
    HeadersOnly,
}

/// One outbound HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: Arc<RequestBody>,
    /// Per-call network timeout.
    pub timeout: Option<Duration>,
    pub read_mode: ReadMode,
}

/// Response returned by a [`Transport`].
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    /// `None` when the response carried no content payload at all.
    pub content: Option<ByteStream>,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            content: None,
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach a fully buffered body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        self.content = Some(Box::pin(futures::stream::once(async move { Ok(body) })));
        self
    }

    pub fn with_stream(mut self, stream: ByteStream) -> Self {
        self.content = Some(stream);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Collect the body. Returns `None` when there is no content payload.
    pub async fn bytes(self) -> Result<Option<Bytes>, TransportError> {
        let Some(mut stream) = self.content else {
            return Ok(None);
        };
        let mut buf = BytesMut::new();
        while let Some(chunk) = stream.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(Some(buf.freeze()))
    }

    /// Collect the body as text, replacing invalid UTF-8.
    pub async fn text(self) -> Result<Option<String>, TransportError> {
        Ok(self
            .bytes()
            .await?
            .map(|b| String::from_utf8_lossy(&b).into_owned()))
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

/// Network-level failure: no usable HTTP response was obtained.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs embed the bot token.
        TransportError::Http(err.without_url())
    }
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout(),
            TransportError::Timeout(_) => true,
            TransportError::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            TransportError::Other(_) => false,
        }
    }
}

/// Sends HTTP requests on behalf of a [`crate::BotClient`].
///
/// Implementations must be safe to share between concurrent calls.
/// Cancellation is handled by the caller dropping the returned future.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
