use crate::client::core::BotClient;
use crate::client::error_classification::{DefaultErrorClassifier, ErrorClassifier};
use crate::client::options::BotClientOptions;
use crate::observers::{ObserverChain, RequestObserver};
use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Network timeout used when neither the builder nor the environment sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(100);

/// Builder for creating clients with custom configuration.
pub struct BotClientBuilder {
    token: Option<String>,
    base_url: Option<String>,
    test_environment: bool,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
    classifier: Arc<dyn ErrorClassifier>,
    observers: ObserverChain,
}

impl BotClientBuilder {
    pub fn new() -> Self {
        Self {
            token: None,
            base_url: None,
            test_environment: false,
            timeout: None,
            transport: None,
            classifier: Arc::new(DefaultErrorClassifier),
            observers: ObserverChain::new(),
        }
    }

    /// Start from the environment:
    /// - `TGBOT_TOKEN`: bot token
    /// - `TGBOT_BASE_URL`: alternate Bot API server
    pub fn from_env() -> Self {
        let mut builder = Self::new();
        builder.token = std::env::var("TGBOT_TOKEN").ok();
        builder.base_url = std::env::var("TGBOT_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        builder
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use a self-hosted Bot API server. Only scheme and authority are kept.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Send calls to the Bot API test environment.
    pub fn test_environment(mut self, enable: bool) -> Self {
        self.test_environment = enable;
        self
    }

    /// Per-call network timeout.
    ///
    /// When unset, `TGBOT_TIMEOUT_SECS` is consulted, then [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the default reqwest-based transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the default error classification strategy.
    pub fn error_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Register a lifecycle observer. Observers run in registration order.
    pub fn observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<BotClient> {
        let token = self
            .token
            .ok_or_else(|| Error::configuration("Bot token must be specified"))?;
        let options = BotClientOptions::new(token, self.base_url.as_deref(), self.test_environment)?;

        let timeout = self
            .timeout
            .or_else(|| {
                std::env::var("TGBOT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
            })
            .unwrap_or(DEFAULT_TIMEOUT);

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(BotClient {
            options,
            transport,
            classifier: self.classifier,
            observers: self.observers,
            timeout,
        })
    }
}

impl Default for BotClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
