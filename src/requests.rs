//! Typed request descriptors.
//!
//! A descriptor names one Bot API method, its HTTP verb and its body.
//! [`crate::BotClient::dispatch`] takes descriptors by value, so a descriptor
//! is consumed by exactly one send.

pub mod body;
pub mod methods;

pub use body::{FormPart, InputFileContent, MultipartForm, RequestBody};
pub use methods::{GetFile, GetMe, RawRequest};

use crate::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;

/// Description of one Bot API call.
pub trait BotRequest: Send {
    /// Type of the `result` field in a successful response.
    type Response: DeserializeOwned + Send + 'static;

    /// Bot API method name appended to the request URL (e.g. `getMe`).
    fn method_name(&self) -> &str;

    fn http_method(&self) -> Method {
        Method::POST
    }

    fn body(&self) -> Result<RequestBody>;
}
