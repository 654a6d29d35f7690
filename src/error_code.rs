//! Bot API 错误码分类：将数值错误码映射为命名类别。
//!
//! Named categories for Bot API numeric error codes.
//!
//! The Bot API reports failures with an HTTP-like `error_code`. This module
//! gives those numbers names so callers can branch on them without magic
//! constants. The mapping is informational: the dispatcher never retries.
//!
//! | Code | Category            | Typical cause                              |
//! |------|---------------------|--------------------------------------------|
//! | 400  | `BadRequest`        | Invalid parameters, chat not found         |
//! | 401  | `Unauthorized`      | Invalid bot token                          |
//! | 403  | `Forbidden`         | Bot was blocked or kicked                  |
//! | 404  | `NotFound`          | Unknown method or token format             |
//! | 409  | `Conflict`          | Concurrent `getUpdates` or webhook active  |
//! | 413  | `PayloadTooLarge`   | Upload exceeds the size limit              |
//! | 429  | `TooManyRequests`   | Flood control, see `retry_after`           |
//! | 5xx  | `ServerError`       | Bot API server failure                     |
//!
//! ## Example
//!
//! ```rust
//! use tgbot_core::error_code::ApiErrorCode;
//!
//! let code = ApiErrorCode::from_code(429);
//! assert_eq!(code, ApiErrorCode::TooManyRequests);
//! assert!(code.retryable());
//! assert_eq!(code.name(), "too_many_requests");
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    PayloadTooLarge,
    TooManyRequests,
    ServerError,
    /// Any code without a named category.
    Other(i32),
}

impl ApiErrorCode {
    pub fn from_code(code: i32) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            413 => Self::PayloadTooLarge,
            429 => Self::TooManyRequests,
            500..=599 => Self::ServerError,
            other => Self::Other(other),
        }
    }

    /// Returns the standard name (e.g., `"bad_request"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::PayloadTooLarge => "payload_too_large",
            Self::TooManyRequests => "too_many_requests",
            Self::ServerError => "server_error",
            Self::Other(_) => "other",
        }
    }

    /// Whether repeating the same call later can succeed.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::TooManyRequests | Self::ServerError)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(code) => write!(f, "other({})", code),
            named => write!(f, "{}", named.name()),
        }
    }
}
