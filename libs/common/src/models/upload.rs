//! File upload payloads

use serde::{Deserialize, Serialize};

/// Payload for `POST /upload/drive`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveUploadRequest {
    pub drive_url: String,
}

/// Location of an uploaded (or linked) image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_url: String,
}
