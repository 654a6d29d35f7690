//! Common imports for endpoint wrappers.

pub use crate::client::{BotClient, BotClientBuilder, ErrorClassifier};
pub use crate::error::{Error, ErrorContext};
pub use crate::observers::{RequestEvent, RequestObserver, ResponseEvent};
pub use crate::requests::{BotRequest, InputFileContent, RequestBody};
pub use crate::types::{ApiResponse, ChatId, File, User};
pub use crate::{CancellationToken, Result};
