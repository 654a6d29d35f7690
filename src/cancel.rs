//! Racing suspension points against a caller-supplied cancellation token.

use crate::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await `fut` unless `cancel` fires first.
///
/// Cancellation wins ties: a token that is already cancelled yields
/// [`Error::Cancelled`] without polling `fut`.
pub(crate) async fn with_cancellation<F>(cancel: &CancellationToken, fut: F) -> Result<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        out = fut => Ok(out),
    }
}
