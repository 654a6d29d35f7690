//! 客户端选项：从令牌和基础地址派生的不可变配置。
//!
//! Immutable client configuration derived once from the token and base URL.

use crate::{Error, ErrorContext, Result};
use std::fmt;
use url::Url;

/// Public Bot API host.
pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Derived, read-only configuration shared by every call of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct BotClientOptions {
    token: String,
    bot_id: Option<i64>,
    base_url: String,
    local_bot_server: bool,
    test_environment: bool,
    base_request_url: String,
    base_file_url: String,
}

impl BotClientOptions {
    /// Derive options from a token and an optional alternate server URL.
    ///
    /// Only the scheme and authority of `base_url` are kept. A base URL whose
    /// origin differs from [`DEFAULT_BASE_URL`] switches the client into local
    /// server mode.
    pub fn new(token: impl Into<String>, base_url: Option<&str>, test_environment: bool) -> Result<Self> {
        let token = token.into();
        let bot_id = parse_bot_id(&token);

        let base_url = match base_url {
            None => DEFAULT_BASE_URL.to_string(),
            Some(raw) => normalize_base_url(raw)?,
        };
        let local_bot_server = base_url != DEFAULT_BASE_URL;

        let env = if test_environment { "/test" } else { "" };
        let base_request_url = format!("{}/bot{}{}", base_url, token, env);
        let base_file_url = format!("{}/file/bot{}{}", base_url, token, env);

        Ok(Self {
            token,
            bot_id,
            base_url,
            local_bot_server,
            test_environment,
            base_request_url,
            base_file_url,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Numeric bot id taken from the token prefix, if it has one.
    pub fn bot_id(&self) -> Option<i64> {
        self.bot_id
    }

    /// Scheme and authority of the API server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn local_bot_server(&self) -> bool {
        self.local_bot_server
    }

    pub fn test_environment(&self) -> bool {
        self.test_environment
    }

    /// `<base>/bot<token>` prefix for method calls.
    pub fn base_request_url(&self) -> &str {
        &self.base_request_url
    }

    /// `<base>/file/bot<token>` prefix for file downloads.
    pub fn base_file_url(&self) -> &str {
        &self.base_file_url
    }

    pub(crate) fn method_url(&self, method_name: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_request_url, method_name)).map_err(|e| {
            // The URL contains the token; report the method name only.
            Error::InvalidArgument {
                message: format!("Cannot build request URL: {}", e),
                context: ErrorContext::new()
                    .with_method(method_name)
                    .with_source("dispatch"),
            }
        })
    }

    pub(crate) fn file_url(&self, file_path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_file_url, file_path)).map_err(|e| {
            Error::InvalidArgument {
                message: format!("Cannot build file URL: {}", e),
                context: ErrorContext::new().with_source("download"),
            }
        })
    }
}

impl fmt::Debug for BotClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotClientOptions")
            .field("token", &"<redacted>")
            .field("bot_id", &self.bot_id)
            .field("base_url", &self.base_url)
            .field("local_bot_server", &self.local_bot_server)
            .field("test_environment", &self.test_environment)
            .finish()
    }
}

/// Leading numeric segment of `<digits>:<secret>`; `None` for any other shape.
pub(crate) fn parse_bot_id(token: &str) -> Option<i64> {
    let (prefix, _) = token.split_once(':')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let invalid = |message: String| Error::InvalidArgument {
        message,
        context: ErrorContext::new().with_source("options"),
    };
    let url = Url::parse(raw).map_err(|e| invalid(format!("Invalid base URL: {}", e)))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid(format!(
            "Base URL must have a scheme and host: {}",
            raw
        )));
    }
    Ok(origin.ascii_serialization())
}
