use crate::client::error_classification::ErrorClassifier;
use crate::client::options::BotClientOptions;
use crate::observers::ObserverChain;
use crate::requests::GetMe;
use crate::transport::Transport;
use crate::types::User;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Client for one bot.
///
/// Cheap to clone and safe to share: every call only reads the client
/// configuration, so many calls may be in flight at once.
#[derive(Clone)]
pub struct BotClient {
    pub(crate) options: BotClientOptions,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) classifier: Arc<dyn ErrorClassifier>,
    pub(crate) observers: ObserverChain,
    pub(crate) timeout: Duration,
}

impl BotClient {
    /// Create a client for the public Bot API with default settings.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        crate::client::builder::BotClientBuilder::new()
            .token(token)
            .build()
    }

    pub fn builder() -> crate::client::builder::BotClientBuilder {
        crate::client::builder::BotClientBuilder::new()
    }

    pub fn options(&self) -> &BotClientOptions {
        &self.options
    }

    /// Bot id parsed from the token, if the token starts with `<digits>:`.
    pub fn bot_id(&self) -> Option<i64> {
        self.options.bot_id()
    }

    /// Whether the client talks to a self-hosted Bot API server.
    pub fn local_bot_server(&self) -> bool {
        self.options.local_bot_server()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn get_me(&self, cancel: &CancellationToken) -> Result<User> {
        self.dispatch(GetMe, cancel).await
    }

    /// Check whether the token is accepted by the server.
    ///
    /// Returns `Ok(false)` only for a 401 rejection; every other failure is
    /// returned as an error.
    pub async fn test_api(&self, cancel: &CancellationToken) -> Result<bool> {
        match self.dispatch(GetMe, cancel).await {
            Ok(_) => Ok(true),
            Err(Error::Api { error_code: 401, .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl std::fmt::Debug for BotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotClient")
            .field("options", &self.options)
            .field("observers", &self.observers)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
