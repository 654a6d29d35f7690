//! 错误分类：取消、传输失败、协议失败与解码失败。
//!
//! Classified errors raised by the dispatch pipeline.
//!
//! Every failure surfaces to the caller as one [`Error`] variant. The four
//! pipeline outcomes are:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`Error::Cancelled`] | The caller cancelled the call; never wrapped |
//! | [`Error::Transport`] | No HTTP response was obtained (DNS, connect, TLS, timeout) |
//! | [`Error::Api`] | A response arrived but the Bot API rejected the call |
//! | [`Error::Decode`] | A response body could not be parsed into the expected envelope |
//!
//! The remaining variants cover argument validation and client construction.

use crate::error_code::ApiErrorCode;
use crate::transport::TransportError;
use crate::types::ResponseParameters;
use std::time::Duration;
use thiserror::Error;

/// Structured context attached to errors raised after an HTTP exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// HTTP status of the response, if one was received.
    pub http_status: Option<u16>,
    /// Raw response body. `Some("")` means an empty body was received,
    /// `None` means no body was available at all.
    pub body: Option<String>,
    /// Bot API method name (e.g. `getMe`) or download path the error belongs to.
    pub method: Option<String>,
    /// Pipeline stage that produced the error (e.g. "dispatch", "download").
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Unified error type for the dispatch pipeline and file downloader.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Request was cancelled")]
    Cancelled,

    #[error("{message}: {source}")]
    Transport {
        message: String,
        #[source]
        source: TransportError,
    },

    #[error("Bot API error {error_code}: {description}")]
    Api {
        error_code: i32,
        description: String,
        parameters: Option<ResponseParameters>,
        context: ErrorContext,
        #[source]
        cause: Option<TransportError>,
    },

    #[error("{message}{}", format_context(.context))]
    Decode {
        message: String,
        context: ErrorContext,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {message}{}", format_context(.context))]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref method) = ctx.method {
        parts.push(format!("method: {}", method));
    }
    if let Some(status) = ctx.http_status {
        parts.push(format!("http status: {}", status));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn transport(message: impl Into<String>, source: TransportError) -> Self {
        Error::Transport {
            message: message.into(),
            source,
        }
    }

    /// Protocol failure carrying only the numeric code and description.
    pub fn api(error_code: i32, description: impl Into<String>, context: ErrorContext) -> Self {
        Error::Api {
            error_code,
            description: description.into(),
            parameters: None,
            context,
            cause: None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            context: ErrorContext::new(),
        }
    }

    /// Extract error context if available.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Api { context, .. }
            | Error::Decode { context, .. }
            | Error::InvalidArgument { context, .. }
            | Error::Configuration { context, .. } => Some(context),
            _ => None,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        self.context().and_then(|c| c.http_status)
    }

    pub fn body(&self) -> Option<&str> {
        self.context().and_then(|c| c.body.as_deref())
    }

    /// Numeric Bot API error code of a protocol failure.
    pub fn error_code(&self) -> Option<i32> {
        match self {
            Error::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Error::Api { description, .. } => Some(description),
            _ => None,
        }
    }

    pub fn parameters(&self) -> Option<&ResponseParameters> {
        match self {
            Error::Api { parameters, .. } => parameters.as_ref(),
            _ => None,
        }
    }

    /// Suggested delay before repeating the call, when the API sent one.
    pub fn retry_after(&self) -> Option<Duration> {
        self.parameters()
            .and_then(|p| p.retry_after)
            .map(|secs| Duration::from_secs(u64::from(secs)))
    }

    /// New chat id for a group that was migrated to a supergroup.
    pub fn migrate_to_chat_id(&self) -> Option<i64> {
        self.parameters().and_then(|p| p.migrate_to_chat_id)
    }

    /// Category of a protocol failure's error code.
    pub fn api_code(&self) -> Option<ApiErrorCode> {
        self.error_code().map(ApiErrorCode::from_code)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport { source, .. } if source.is_timeout())
    }
}
