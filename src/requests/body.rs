//! Encodable request bodies: empty, JSON, or multipart with file parts.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use serde::Serialize;

/// Binary attachment sent as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFileContent {
    pub file_name: String,
    pub bytes: Bytes,
    pub mime: Option<String>,
}

impl InputFileContent {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File(InputFileContent),
}

/// Ordered list of named multipart parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), FormPart::Text(value.into())));
        self
    }

    pub fn file(mut self, name: impl Into<String>, file: InputFileContent) -> Self {
        self.parts.push((name.into(), FormPart::File(file)));
        self
    }

    pub fn parts(&self) -> impl Iterator<Item = &(String, FormPart)> {
        self.parts.iter()
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Body of one outbound Bot API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-encoded JSON document.
    Json(Bytes),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value)
            .map(|v| RequestBody::Json(Bytes::from(v)))
            .map_err(|e| Error::InvalidArgument {
                message: format!("Failed to encode request body: {}", e),
                context: ErrorContext::new().with_source("request_body"),
            })
    }

    /// Encode `payload` as JSON, or as multipart when `files` is non-empty.
    ///
    /// In the multipart case every top-level field of `payload` becomes a text
    /// part: strings are sent verbatim, other values as their JSON encoding.
    /// `null` fields are skipped.
    pub fn with_files<T: Serialize + ?Sized>(
        payload: &T,
        files: Vec<(String, InputFileContent)>,
    ) -> Result<Self> {
        if files.is_empty() {
            return Self::json(payload);
        }

        let value = serde_json::to_value(payload).map_err(|e| Error::InvalidArgument {
            message: format!("Failed to encode request body: {}", e),
            context: ErrorContext::new().with_source("request_body"),
        })?;
        let serde_json::Value::Object(fields) = value else {
            return Err(Error::invalid_argument(
                "Multipart request payload must be a JSON object",
            ));
        };

        let mut form = MultipartForm::new();
        for (name, field) in fields {
            form = match field {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => form.text(name, s),
                other => form.text(name, other.to_string()),
            };
        }
        for (name, file) in files {
            form = form.file(name, file);
        }
        let body = RequestBody::Multipart(form);
        body.validate()?;
        Ok(body)
    }

    /// Check what can be checked before sending: every file part's MIME type
    /// must parse.
    pub fn validate(&self) -> Result<()> {
        let RequestBody::Multipart(form) = self else {
            return Ok(());
        };
        for (name, part) in form.parts() {
            let FormPart::File(file) = part else {
                continue;
            };
            if let Some(mime) = &file.mime {
                reqwest::multipart::Part::text("")
                    .mime_str(mime)
                    .map_err(|_| Error::InvalidArgument {
                        message: format!("Invalid MIME type {:?} for part {:?}", mime, name),
                        context: ErrorContext::new().with_source("request_body"),
                    })?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Json(bytes) => bytes.is_empty(),
            RequestBody::Multipart(form) => form.is_empty(),
        }
    }

    /// Encoded JSON bytes, for JSON bodies.
    pub fn as_json(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Json(bytes) => Some(bytes),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn without_files_encodes_json() {
        let body = RequestBody::with_files(&json!({"chat_id": 1, "text": "hi"}), Vec::new()).unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(body.as_json().unwrap()).unwrap();
        assert_eq!(decoded["text"], "hi");
    }

    #[test]
    fn files_switch_to_multipart() {
        let payload = json!({
            "chat_id": -100123,
            "caption": "cat",
            "reply_markup": {"remove_keyboard": true},
            "disable_notification": null,
        });
        let photo = InputFileContent::new("cat.jpg", Bytes::from_static(b"\xff\xd8")).with_mime("image/jpeg");
        let body = RequestBody::with_files(&payload, vec![("photo".into(), photo.clone())]).unwrap();

        let RequestBody::Multipart(form) = body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.get("chat_id"), Some(&FormPart::Text("-100123".into())));
        assert_eq!(form.get("caption"), Some(&FormPart::Text("cat".into())));
        assert_eq!(
            form.get("reply_markup"),
            Some(&FormPart::Text(r#"{"remove_keyboard":true}"#.into()))
        );
        assert!(form.get("disable_notification").is_none());
        assert_eq!(form.get("photo"), Some(&FormPart::File(photo)));
    }

    #[test]
    fn malformed_mime_is_rejected_while_building() {
        let file = InputFileContent::new("a.txt", Bytes::from_static(b"a")).with_mime("not a mime");
        let err = RequestBody::with_files(&json!({"chat_id": 1}), vec![("document".into(), file)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));

        let form = MultipartForm::new().file(
            "document",
            InputFileContent::new("a.txt", Bytes::from_static(b"a")).with_mime("text/plain"),
        );
        assert!(RequestBody::Multipart(form).validate().is_ok());
    }

    #[test]
    fn multipart_requires_object_payload() {
        let file = InputFileContent::new("a.txt", Bytes::from_static(b"a"));
        let err = RequestBody::with_files(&json!([1, 2]), vec![("document".into(), file)]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }
}
