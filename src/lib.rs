//! # tgbot-core
//!
//! Telegram Bot API 客户端核心：请求分发、错误分类与文件下载。
//!
//! Request/response dispatch core for Telegram Bot API clients.
//!
//! ## Overview
//!
//! Endpoint wrappers describe a call as a [`BotRequest`] (method name, HTTP
//! verb, body). The [`BotClient`] turns it into an HTTP request, runs the
//! registered lifecycle observers, sends it through a pluggable [`Transport`]
//! and decodes the `{ok, result}` envelope into the typed result, or into a
//! classified [`Error`].
//!
//! ## Key Features
//!
//! - **Typed dispatch**: [`BotClient::dispatch`] returns `result` directly,
//!   [`BotClient::dispatch_raw`] returns the whole [`ApiResponse`] envelope
//! - **Classified errors**: cancellation, transport, protocol and decode
//!   failures are distinct [`Error`] variants; the classification strategy is
//!   replaceable via [`ErrorClassifier`]
//! - **Lifecycle observers**: ordered async hooks before send and after
//!   response via [`RequestObserver`]
//! - **File download**: streamed GET, with a local-filesystem shortcut for
//!   self-hosted Bot API servers
//! - **Cooperative cancellation**: every call takes a [`CancellationToken`]
//!
//! No retries, backoff or rate limiting are performed; [`Error::retry_after`]
//! exposes the server's hint for callers that want them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tgbot_core::{BotClient, CancellationToken};
//!
//! #[tokio::main]
//! async fn main() -> tgbot_core::Result<()> {
//!     let client = BotClient::new("123456:your-bot-token")?;
//!     let cancel = CancellationToken::new();
//!
//!     if client.test_api(&cancel).await? {
//!         let me = client.get_me(&cancel).await?;
//!         println!("running as @{}", me.username.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, dispatcher, downloader, error classifier |
//! | [`requests`] | Request descriptors and request bodies |
//! | [`types`] | Response envelope, chat id and core API objects |
//! | [`observers`] | Lifecycle observer hooks |
//! | [`transport`] | Transport trait and the reqwest implementation |
//! | [`error_code`] | Named categories for Bot API error codes |

mod cancel;
pub mod client;
pub mod error_code;
pub mod observers;
pub mod prelude;
pub mod requests;
pub mod transport;
pub mod types;

pub use client::{
    BotClient, BotClientBuilder, BotClientOptions, DefaultErrorClassifier, ErrorClassifier,
    FailureContext, FailureScope,
};
pub use observers::{ObserverChain, RequestEvent, RequestObserver, ResponseEvent};
pub use requests::{BotRequest, InputFileContent, MultipartForm, RequestBody};
pub use tokio_util::sync::CancellationToken;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use types::{ApiResponse, ChatId, File, ResponseParameters, User};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
