//! Application Configuration
//!
//! 設定ディレクトリとエンドポイントの解決

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default directory name under the user's home
pub const DEFAULT_DIR_NAME: &str = ".godrive";
pub const CLIENT_SECRETS_FILE: &str = "client_secrets.json";
pub const CREDENTIAL_FILE: &str = "auth.txt";

pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

/// Explicit configuration handed to every adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub config_dir: PathBuf,
    pub drive_upload_url: String,
    pub scope: String,
}

impl AppConfig {
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            drive_upload_url: DRIVE_UPLOAD_URL.to_string(),
            scope: DRIVE_SCOPE.to_string(),
        }
    }

    /// Resolve the configuration directory
    ///
    /// An explicit override (from `--config-dir` or `GODRIVE_DIR`) wins;
    /// otherwise `~/.godrive` is used.
    pub fn resolve(config_dir: Option<&str>) -> Result<Self> {
        let dir = match config_dir {
            Some(dir) => expand_dir(dir),
            None => dirs::home_dir()
                .context("Unable to determine home directory")?
                .join(DEFAULT_DIR_NAME),
        };
        Ok(Self::new(dir))
    }

    pub fn with_drive_upload_url(mut self, url: impl Into<String>) -> Self {
        self.drive_upload_url = url.into();
        self
    }

    pub fn client_secrets_path(&self) -> PathBuf {
        self.config_dir.join(CLIENT_SECRETS_FILE)
    }

    pub fn credential_path(&self) -> PathBuf {
        self.config_dir.join(CREDENTIAL_FILE)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }
}

/// Expands tilde in a directory argument
pub fn expand_dir(dir: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(dir).as_ref())
}
