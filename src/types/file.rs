use serde::{Deserialize, Serialize};

/// A file ready to be downloaded.
///
/// `file_path` is relative to the file endpoint on the public Bot API; a
/// self-hosted server running in local mode returns an absolute filesystem
/// path instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}
