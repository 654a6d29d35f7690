//! Error classification logic
//!
//! Turns what was observed about a failed exchange into one [`Error`]. The
//! strategy is replaceable through [`crate::BotClientBuilder::error_classifier`];
//! any `Fn(FailureContext) -> Error` closure can serve as one.

use crate::transport::TransportError;
use crate::types::FailureEnvelope;
use crate::{Error, ErrorContext};
use tracing::info;

/// Which pipeline produced the failure; selects the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    Request,
    FileDownload,
}

impl FailureScope {
    pub fn timeout_message(self) -> &'static str {
        match self {
            FailureScope::Request => "Request timed out",
            FailureScope::FileDownload => "File download request timed out",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            FailureScope::Request => "Exception during making request",
            FailureScope::FileDownload => "Exception during file download request",
        }
    }

    fn source(self) -> &'static str {
        match self {
            FailureScope::Request => "dispatch",
            FailureScope::FileDownload => "download",
        }
    }
}

/// Everything known about a failure at the point it was observed.
#[derive(Debug)]
pub struct FailureContext {
    pub scope: FailureScope,
    /// Bot API method name; `None` for file downloads.
    pub method: Option<String>,
    pub http_status: Option<u16>,
    /// Decoded failure envelope, when the body was parseable.
    pub envelope: Option<FailureEnvelope>,
    /// Raw response body; `None` when absent or unparseable.
    pub body: Option<String>,
    /// Transport failure, when no response was obtained.
    pub cause: Option<TransportError>,
}

impl FailureContext {
    pub fn new(scope: FailureScope) -> Self {
        Self {
            scope,
            method: None,
            http_status: None,
            envelope: None,
            body: None,
            cause: None,
        }
    }

    fn error_context(&self) -> ErrorContext {
        let mut context = ErrorContext::new().with_source(self.scope.source());
        if let Some(method) = &self.method {
            context = context.with_method(method.clone());
        }
        if let Some(status) = self.http_status {
            context = context.with_http_status(status);
        }
        if let Some(body) = &self.body {
            context = context.with_body(body.clone());
        }
        context
    }
}

/// Strategy mapping a [`FailureContext`] to a classified [`Error`].
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, context: FailureContext) -> Error;
}

impl<F> ErrorClassifier for F
where
    F: Fn(FailureContext) -> Error + Send + Sync,
{
    fn classify(&self, context: FailureContext) -> Error {
        self(context)
    }
}

/// Default strategy.
///
/// Precedence:
/// 1. a transport cause always yields [`Error::Transport`];
/// 2. an envelope with a numeric `error_code` yields [`Error::Api`] with its
///    code, description and parameters;
/// 3. otherwise [`Error::Api`] built from the HTTP status and raw body alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorClassifier;

impl ErrorClassifier for DefaultErrorClassifier {
    fn classify(&self, mut ctx: FailureContext) -> Error {
        if let Some(cause) = ctx.cause.take() {
            let message = if cause.is_timeout() {
                ctx.scope.timeout_message()
            } else {
                ctx.scope.failure_message()
            };
            return Error::transport(message, cause);
        }

        let context = ctx.error_context();
        let status = ctx.http_status;

        if let Some(envelope) = ctx.envelope.take() {
            if let Some(error_code) = envelope.error_code {
                info!(
                    http_status = status.unwrap_or_default(),
                    error_code,
                    method = ctx.method.as_deref().unwrap_or(""),
                    "bot api call rejected"
                );
                return Error::Api {
                    error_code,
                    description: envelope.description.unwrap_or_default(),
                    parameters: envelope.parameters,
                    context,
                    cause: None,
                };
            }
        }

        let status = status.unwrap_or_default();
        info!(
            http_status = status,
            method = ctx.method.as_deref().unwrap_or(""),
            "bot api call failed without an error envelope"
        );
        Error::api(
            i32::from(status),
            format!("Bot API service failure: HTTP {}", status),
            context,
        )
    }
}
