use super::{HttpRequest, HttpResponse, ReadMode, Transport, TransportError};
use crate::requests::{FormPart, MultipartForm, RequestBody};
use crate::{Error, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::env;
use std::time::Duration;

const USER_AGENT: &str = concat!("tgbot-core/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(
                env::var("TGBOT_HTTP_POOL_MAX_IDLE_PER_HOST")
                    .ok()
                    .and_then(|s| s.parse::<usize>().ok())
                    .unwrap_or(32),
            )
            .pool_idle_timeout(Some(Duration::from_secs(
                env::var("TGBOT_HTTP_POOL_IDLE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(90),
            )));

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_form(form: &MultipartForm) -> std::result::Result<reqwest::multipart::Form, TransportError> {
    let mut out = reqwest::multipart::Form::new();
    for (name, part) in form.parts() {
        out = match part {
            FormPart::Text(value) => out.text(name.clone(), value.clone()),
            FormPart::File(file) => {
                let mut p = reqwest::multipart::Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name.clone());
                if let Some(mime) = &file.mime {
                    p = p.mime_str(mime)?;
                }
                out.part(name.clone(), p)
            }
        };
    }
    Ok(out)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match request.body.as_ref() {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes.clone()),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();

        let response = HttpResponse::new(status).with_headers(headers);
        match request.read_mode {
            ReadMode::Buffered => {
                let body = resp.bytes().await?;
                Ok(response.with_body(body))
            }
            ReadMode::HeadersOnly => {
                let stream = resp.bytes_stream().map_err(TransportError::from);
                Ok(response.with_stream(Box::pin(stream)))
            }
        }
    }
}
