//! Built-in descriptors used by the client itself, plus [`RawRequest`] for
//! calling any other method with a JSON payload.

use super::body::{InputFileContent, RequestBody};
use super::BotRequest;
use crate::types::{File, User};
use crate::Result;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// `getMe`: returns basic information about the bot.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetMe;

impl BotRequest for GetMe {
    type Response = User;

    fn method_name(&self) -> &str {
        "getMe"
    }

    fn body(&self) -> Result<RequestBody> {
        Ok(RequestBody::Empty)
    }
}

/// `getFile`: resolves a file id to a downloadable path.
#[derive(Debug, Clone, Serialize)]
pub struct GetFile {
    pub file_id: String,
}

impl GetFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

impl BotRequest for GetFile {
    type Response = File;

    fn method_name(&self) -> &str {
        "getFile"
    }

    fn body(&self) -> Result<RequestBody> {
        RequestBody::json(self)
    }
}

/// Untyped descriptor for any Bot API method.
///
/// ```rust
/// use tgbot_core::requests::{BotRequest, RawRequest};
/// use serde_json::json;
///
/// let request = RawRequest::<serde_json::Value>::new("sendMessage")
///     .with_payload(json!({"chat_id": 42, "text": "hello"}));
/// assert_eq!(request.method_name(), "sendMessage");
/// ```
#[derive(Debug)]
pub struct RawRequest<T> {
    method_name: String,
    http_method: Method,
    payload: Option<serde_json::Value>,
    files: Vec<(String, InputFileContent)>,
    _response: PhantomData<fn() -> T>,
}

impl<T> RawRequest<T> {
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            http_method: Method::POST,
            payload: None,
            files: Vec::new(),
            _response: PhantomData,
        }
    }

    pub fn with_http_method(mut self, method: Method) -> Self {
        self.http_method = method;
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach a file part; the request is then sent as multipart.
    pub fn with_file(mut self, field: impl Into<String>, file: InputFileContent) -> Self {
        self.files.push((field.into(), file));
        self
    }
}

impl<T> BotRequest for RawRequest<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Response = T;

    fn method_name(&self) -> &str {
        &self.method_name
    }

    fn http_method(&self) -> Method {
        self.http_method.clone()
    }

    fn body(&self) -> Result<RequestBody> {
        match &self.payload {
            None if self.files.is_empty() => Ok(RequestBody::Empty),
            None => RequestBody::with_files(&serde_json::json!({}), self.files.clone()),
            Some(payload) => RequestBody::with_files(payload, self.files.clone()),
        }
    }
}
