//! Bot API client: request dispatch, error classification and file download.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod download;
pub mod error_classification;
pub mod execution;
pub mod options;

pub use builder::BotClientBuilder;
pub use core::BotClient;
pub use error_classification::{DefaultErrorClassifier, ErrorClassifier, FailureContext, FailureScope};
pub use options::{BotClientOptions, DEFAULT_BASE_URL};
