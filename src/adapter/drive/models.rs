//! Google Drive API Models
//!
//! Drive APIのリクエスト/レスポンスモデル

use serde::{Deserialize, Serialize};

use crate::domain::repositories::drive_repository::RemoteFile;

/// Metadata part of a multipart upload
#[derive(Debug, Serialize)]
pub struct FileMetadata<'a> {
    pub name: &'a str,
}

/// File resource returned by `files.create`
#[derive(Debug, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl DriveFile {
    /// Drive echoes the name back; fall back to the requested one if it does not
    pub fn into_remote(self, requested_name: &str) -> RemoteFile {
        RemoteFile {
            id: self.id,
            name: self.name.unwrap_or_else(|| requested_name.to_string()),
        }
    }
}

// Error envelope: {"error": {"code": 403, "message": "..."}}
#[derive(Debug, Deserialize)]
pub struct DriveErrorResponse {
    pub error: DriveErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct DriveErrorDetail {
    pub code: u16,
    pub message: String,
}

/// `multipart/related` body carrying metadata then raw content
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn content_type(&self) -> String {
        format!("multipart/related; boundary={}", self.boundary)
    }
}

pub fn build_multipart_body(
    boundary: &str,
    metadata: &FileMetadata<'_>,
    content: &[u8],
) -> serde_json::Result<MultipartBody> {
    let metadata = serde_json::to_string(metadata)?;

    let mut bytes = Vec::with_capacity(content.len() + metadata.len() + 4 * boundary.len() + 128);
    bytes.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n--{boundary}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    bytes.extend_from_slice(content);
    bytes.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Ok(MultipartBody {
        boundary: boundary.to_string(),
        bytes,
    })
}
