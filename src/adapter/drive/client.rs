//! Google Drive Client
//!
//! `files.create` をmultipartアップロードで呼び出すクライアント

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};

use super::models::{build_multipart_body, DriveErrorResponse, DriveFile, FileMetadata};
use crate::domain::entities::credential::Session;
use crate::domain::repositories::drive_repository::{DriveRepository, RemoteFile};

/// Drive API client implementing DriveRepository
pub struct GoogleDriveClient {
    client: reqwest::Client,
    upload_url: String,
}

impl GoogleDriveClient {
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}?uploadType=multipart", self.upload_url)
    }
}

/// Short description of a failed API response
fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<DriveErrorResponse>(body) {
        Ok(err) => format!("Drive API error {}: {}", err.error.code, err.error.message),
        Err(_) => format!("Drive API returned {}: {}", status, body.trim()),
    }
}

#[async_trait]
impl DriveRepository for GoogleDriveClient {
    async fn create_file(
        &self,
        session: &Session,
        name: &str,
        content: Vec<u8>,
    ) -> Result<RemoteFile> {
        let boundary = format!("godrive-{}", uuid::Uuid::new_v4().simple());
        let body = build_multipart_body(&boundary, &FileMetadata { name }, &content)
            .context("Failed to encode file metadata")?;
        drop(content);

        debug!("POST {} ({} bytes)", self.endpoint(), body.bytes.len());
        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", session.authorization_header())
            .header("Content-Type", body.content_type())
            .body(body.bytes)
            .send()
            .await
            .context("Failed to reach Google Drive")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read the Drive response")?;

        if !status.is_success() {
            bail!(describe_error(status, &text));
        }

        let file: DriveFile = serde_json::from_str(&text)
            .with_context(|| format!("Unexpected Drive response: {}", text))?;
        info!("Created Drive file {} ({})", name, file.id);
        Ok(file.into_remote(name))
    }
}
