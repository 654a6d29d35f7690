//! 类型模块：Bot API 响应信封与核心数据类型。
//!
//! # Types Module
//!
//! Wire-level types shared by the dispatcher, the downloader and endpoint
//! wrappers built on top of this crate.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ApiResponse`] | Uniform `{ok, result, error_code, description, parameters}` envelope |
//! | [`ResponseParameters`] | Structured failure hints (retry delay, migrated chat id) |
//! | [`ChatId`] | Numeric chat id or `@username` |
//! | [`User`] | Bot or user account returned by `getMe` |
//! | [`File`] | File metadata returned by `getFile` |
//!
//! ## Example
//!
//! ```rust
//! use tgbot_core::types::{ApiResponse, ChatId};
//!
//! let envelope: ApiResponse<bool> = serde_json::from_str(r#"{"ok":true,"result":true}"#).unwrap();
//! assert_eq!(envelope.result, Some(true));
//!
//! let chat: ChatId = "@telegram_news".parse().unwrap();
//! assert_eq!(chat.to_string(), "@telegram_news");
//! ```

pub mod chat_id;
pub mod envelope;
pub mod file;
pub mod user;

pub use chat_id::ChatId;
pub use envelope::{ApiResponse, FailureEnvelope, ResponseParameters};
pub use file::File;
pub use user::User;
