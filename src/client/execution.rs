//! 请求执行逻辑：构建请求、调用观察者、发送并解码响应信封。
//!
//! Request execution logic (single attempt, no retry).

use crate::cancel::with_cancellation;
use crate::observers::{RequestEvent, ResponseEvent};
use crate::requests::BotRequest;
use crate::transport::{HttpRequest, ReadMode, TransportError};
use crate::types::envelope::SuccessEnvelope;
use crate::types::{ApiResponse, FailureEnvelope};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::core::BotClient;
use super::error_classification::{FailureContext, FailureScope};

impl BotClient {
    /// Send `request` and return the decoded `result`.
    ///
    /// Non-200 responses are turned into an error by the configured
    /// [`crate::ErrorClassifier`].
    pub async fn dispatch<R: BotRequest>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<R::Response> {
        let response = self.exchange(request, cancel).await?;
        let method = response.request.method_name.as_str();

        if response.status != 200 {
            return Err(self.classify_response(&response));
        }

        match SuccessEnvelope::decode::<R::Response>(&response.body) {
            Ok(result) => {
                debug!(
                    method,
                    request_id = %response.request.request_id,
                    "bot api call succeeded"
                );
                Ok(result)
            }
            Err(source) => Err(Error::Decode {
                message: "Required properties not found in response".into(),
                context: ErrorContext::new()
                    .with_http_status(response.status)
                    .with_body(String::from_utf8_lossy(&response.body))
                    .with_method(method)
                    .with_source("dispatch"),
                source,
            }),
        }
    }

    /// Send `request` and return the whole envelope, whatever the status.
    ///
    /// A protocol failure comes back as an envelope with `ok == false`.
    /// Transport failures and bodies that are not an envelope at all are
    /// still errors.
    pub async fn dispatch_raw<R: BotRequest>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<R::Response>> {
        let response = self.exchange(request, cancel).await?;

        serde_json::from_slice::<ApiResponse<R::Response>>(&response.body).map_err(|source| {
            Error::Decode {
                message: "Response is not a valid Bot API envelope".into(),
                context: ErrorContext::new()
                    .with_http_status(response.status)
                    .with_body(String::from_utf8_lossy(&response.body))
                    .with_method(response.request.method_name.clone())
                    .with_source("dispatch_raw"),
                source,
            }
        })
    }

    /// Build, observe and send one call; returns the buffered response after
    /// the after-response observers ran.
    async fn exchange<R: BotRequest>(
        &self,
        request: R,
        cancel: &CancellationToken,
    ) -> Result<ResponseEvent> {
        let url = self.options.method_url(request.method_name())?;
        let body = request.body()?;
        body.validate()?;
        let body = Arc::new(body);
        let http_method = request.http_method();
        let event = Arc::new(RequestEvent::new(request.method_name(), body.clone()));
        drop(request);

        self.observers.before_send(&event, cancel).await?;

        let http_request = HttpRequest {
            method: http_method,
            url,
            body,
            timeout: Some(self.timeout),
            read_mode: ReadMode::Buffered,
        };

        debug!(
            method = event.method_name.as_str(),
            request_id = %event.request_id,
            "sending bot api request"
        );
        let start = Instant::now();

        let sent = with_cancellation(cancel, async {
            let response = self.transport.send(http_request).await?;
            let status = response.status;
            let headers = response.headers.clone();
            let body = response.bytes().await?.unwrap_or_default();
            Ok::<_, TransportError>((status, headers, body))
        })
        .await?;

        let (status, headers, body) = match sent {
            Ok(parts) => parts,
            Err(cause) => {
                return Err(self.transport_failure(
                    cause,
                    cancel,
                    FailureScope::Request,
                    Some(event.method_name.clone()),
                ))
            }
        };

        debug!(
            method = event.method_name.as_str(),
            request_id = %event.request_id,
            http_status = status,
            duration_ms = start.elapsed().as_millis() as u64,
            "bot api response received"
        );

        let response = ResponseEvent {
            request: event,
            status,
            headers,
            body,
        };
        self.observers.after_response(&response, cancel).await?;
        Ok(response)
    }

    /// A transport error observed after the caller cancelled is the
    /// cancellation itself.
    pub(crate) fn transport_failure(
        &self,
        cause: TransportError,
        cancel: &CancellationToken,
        scope: FailureScope,
        method: Option<String>,
    ) -> Error {
        if cancel.is_cancelled() {
            return Error::Cancelled;
        }
        let mut ctx = FailureContext::new(scope);
        ctx.method = method;
        ctx.cause = Some(cause);
        self.classifier.classify(ctx)
    }

    fn classify_response(&self, response: &ResponseEvent) -> Error {
        let mut ctx = FailureContext::new(FailureScope::Request);
        ctx.method = Some(response.request.method_name.clone());
        ctx.http_status = Some(response.status);

        match serde_json::from_slice::<FailureEnvelope>(&response.body) {
            Ok(envelope) => {
                ctx.body = Some(String::from_utf8_lossy(&response.body).into_owned());
                ctx.envelope = Some(envelope);
            }
            Err(e) => {
                warn!(
                    method = response.request.method_name.as_str(),
                    http_status = response.status,
                    error = %e,
                    "failed to decode error envelope"
                );
            }
        }

        self.classifier.classify(ctx)
    }
}
