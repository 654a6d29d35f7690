//! Lifecycle observers around each Bot API call.
//!
//! Observers are side-channel hooks for logging, metrics and auditing. They
//! see an immutable snapshot of the outgoing call before it is sent and the
//! raw HTTP response before it is decoded. They cannot change either.
//!
//! - Observers run in registration order and each one is awaited before the
//!   next starts.
//! - An error returned by an observer aborts the call and is returned to the
//!   caller of `dispatch`.
//! - The [`RequestEvent`] handed to `after_response` is the same `Arc` that
//!   was handed to `before_send` for that call.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::cancel::with_cancellation;
use crate::requests::RequestBody;
use crate::Result;

/// Snapshot of a call that is about to be sent.
#[derive(Debug)]
pub struct RequestEvent {
    /// Correlation id, also attached to log records for this call.
    pub request_id: Uuid,
    pub method_name: String,
    pub body: Arc<RequestBody>,
}

impl RequestEvent {
    pub fn new(method_name: impl Into<String>, body: Arc<RequestBody>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method_name: method_name.into(),
            body,
        }
    }
}

/// Snapshot of a received response, paired with its request snapshot.
#[derive(Debug, Clone)]
pub struct ResponseEvent {
    pub request: Arc<RequestEvent>,
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[async_trait]
pub trait RequestObserver: Send + Sync {
    async fn before_send(&self, _event: &Arc<RequestEvent>) -> Result<()> {
        Ok(())
    }

    async fn after_response(&self, _event: &ResponseEvent) -> Result<()> {
        Ok(())
    }
}

/// Ordered list of observers invoked by the dispatcher.
#[derive(Clone, Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl ObserverChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn push(&mut self, observer: Arc<dyn RequestObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) async fn before_send(
        &self,
        event: &Arc<RequestEvent>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        for observer in &self.observers {
            with_cancellation(cancel, observer.before_send(event)).await??;
        }
        Ok(())
    }

    pub(crate) async fn after_response(
        &self,
        event: &ResponseEvent,
        cancel: &CancellationToken,
    ) -> Result<()> {
        for observer in &self.observers {
            with_cancellation(cancel, observer.after_response(event)).await??;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObserverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverChain")
            .field("observers", &self.observers.len())
            .finish()
    }
}
