//! File download: local-filesystem shortcut for self-hosted servers, streamed
//! HTTP GET otherwise.

use crate::cancel::with_cancellation;
use crate::requests::{GetFile, RequestBody};
use crate::transport::{HttpRequest, ReadMode, TransportError};
use crate::types::{FailureEnvelope, File};
use crate::{Error, ErrorContext, Result};
use futures::StreamExt;
use reqwest::Method;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::core::BotClient;
use super::error_classification::{FailureContext, FailureScope};

impl BotClient {
    /// Copy the file at `file_path` into `destination`.
    ///
    /// `file_path` is the `file_path` of a [`File`]. In local server mode an
    /// absolute path that exists on this machine is read directly instead of
    /// being fetched over HTTP.
    pub async fn download_file<W>(
        &self,
        file_path: &str,
        destination: &mut W,
        cancel: &CancellationToken,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        if file_path.chars().count() < 2 {
            return Err(Error::InvalidArgument {
                message: "Invalid file path".into(),
                context: ErrorContext::new().with_source("download"),
            });
        }

        if self.options.local_bot_server() && is_local_file(file_path).await {
            debug!("copying file from the local bot api server filesystem");
            let mut file = tokio::fs::File::open(file_path).await?;
            with_cancellation(cancel, async {
                tokio::io::copy(&mut file, destination).await?;
                destination.flush().await
            })
            .await??;
            return Ok(());
        }

        let request = HttpRequest {
            method: Method::GET,
            url: self.options.file_url(file_path)?,
            body: Arc::new(RequestBody::Empty),
            timeout: Some(self.timeout),
            read_mode: ReadMode::HeadersOnly,
        };

        let response = match with_cancellation(cancel, self.transport.send(request)).await? {
            Ok(response) => response,
            Err(cause) => {
                return Err(self.transport_failure(cause, cancel, FailureScope::FileDownload, None))
            }
        };
        let status = response.status;

        if !response.is_success() {
            let body = match with_cancellation(cancel, response.bytes()).await? {
                Ok(body) => body,
                Err(e) => {
                    warn!(http_status = status, error = %e, "failed to read file download error body");
                    None
                }
            };
            let envelope = body
                .as_ref()
                .and_then(|b| serde_json::from_slice::<FailureEnvelope>(b).ok());

            let mut ctx = FailureContext::new(FailureScope::FileDownload);
            ctx.http_status = Some(status);
            if envelope.is_some() {
                ctx.body = body.map(|b| String::from_utf8_lossy(&b).into_owned());
            }
            ctx.envelope = envelope;
            return Err(self.classifier.classify(ctx));
        }

        let Some(mut content) = response.content else {
            return Err(Error::api(
                i32::from(status),
                "Response doesn't contain any content",
                ErrorContext::new()
                    .with_http_status(status)
                    .with_source("download"),
            ));
        };

        let copied = with_cancellation(cancel, async {
            let mut written: u64 = 0;
            while let Some(chunk) = content.next().await {
                let chunk = chunk?;
                destination.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            destination.flush().await?;
            Ok::<_, TransportError>(written)
        })
        .await?;

        match copied {
            Ok(written) => {
                debug!(http_status = status, bytes = written, "file download finished");
                Ok(())
            }
            Err(cause) => Err(Error::Api {
                error_code: i32::from(status),
                description: "Exception during file download".into(),
                parameters: None,
                context: ErrorContext::new()
                    .with_http_status(status)
                    .with_source("download"),
                cause: Some(cause),
            }),
        }
    }

    /// Resolve `file_id` with `getFile`, download it into `destination` and
    /// return the file metadata.
    pub async fn get_info_and_download_file<W>(
        &self,
        file_id: impl Into<String>,
        destination: &mut W,
        cancel: &CancellationToken,
    ) -> Result<File>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let file = self.dispatch(GetFile::new(file_id), cancel).await?;
        let file_path = file.file_path.as_deref().ok_or_else(|| Error::InvalidArgument {
            message: "getFile returned no file_path".into(),
            context: ErrorContext::new()
                .with_method("getFile")
                .with_source("download"),
        })?;

        self.download_file(file_path, destination, cancel).await?;
        Ok(file)
    }
}

/// Only absolute paths qualify; relative ones are server paths even if a
/// file of that name exists in the working directory.
async fn is_local_file(file_path: &str) -> bool {
    let path = Path::new(file_path);
    if !path.is_absolute() {
        return false;
    }
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
