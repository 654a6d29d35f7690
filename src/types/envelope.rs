//! The Bot API response envelope.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Serialize};

/// Structured hints attached to some failures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait before the request can be repeated (flood control).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
}

/// Full response envelope, returned as-is by [`crate::BotClient::dispatch_raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

fn none<T>() -> Option<T> {
    None
}

impl<T> ApiResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error_code: None,
            description: None,
            parameters: None,
        }
    }

    pub fn failure(error_code: i32, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error_code: Some(error_code),
            description: Some(description.into()),
            parameters: None,
        }
    }
}

/// Failure fields of an envelope. Every field is optional so that partial
/// bodies still yield whatever they carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FailureEnvelope {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Option<ResponseParameters>,
}

/// Success shape. `result` is kept as raw JSON until `ok` and its presence
/// have been checked, so `T: Option<_>` or `T: Value` cannot mask a missing
/// or `null` result.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

impl SuccessEnvelope {
    /// Decode `body` into the typed `result` of a successful call.
    pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
        let envelope: SuccessEnvelope = serde_json::from_slice(body)?;
        if !envelope.ok {
            return Err(de::Error::custom("envelope reports ok == false"));
        }
        match envelope.result {
            None | Some(serde_json::Value::Null) => Err(de::Error::missing_field("result")),
            Some(result) => serde_json::from_value(result),
        }
    }
}
