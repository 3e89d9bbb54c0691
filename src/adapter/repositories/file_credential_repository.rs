//! File Credential Repository Implementation
//!
//! CredentialRepositoryのファイル実装（client_secrets.json と auth.txt）

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::config::AppConfig;
use crate::domain::entities::client_config::ClientConfig;
use crate::domain::entities::credential::CachedCredential;
use crate::domain::repositories::credential_repository::CredentialRepository;

/// 設定ディレクトリ配下のファイルで認証情報を保持するリポジトリ
pub struct FileCredentialRepository {
    config_dir: PathBuf,
    client_secrets_path: PathBuf,
    credential_path: PathBuf,
}

/// キャッシュ済みトークン（JSON永続化用の内部表現）
#[derive(Debug, Deserialize, Serialize)]
struct CredentialJson {
    access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    token_type: String,
    expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl FileCredentialRepository {
    /// 新しいリポジトリを作成
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config_dir: config.config_dir.clone(),
            client_secrets_path: config.client_secrets_path(),
            credential_path: config.credential_path(),
        }
    }

    fn ensure_dir(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))
    }

    /// クライアント設定を読み込む（同期処理）
    fn load_client_config_sync(path: &Path) -> Result<ClientConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = ClientConfig::parse(&content)
            .with_context(|| format!("Invalid client configuration in {}", path.display()))?;
        Ok(config)
    }

    /// クライアント設定を保存する（同期処理）
    fn save_client_config_sync(dir: &Path, path: &Path, raw: &str) -> Result<()> {
        Self::ensure_dir(dir)?;
        fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved client configuration to {}", path.display());
        Ok(())
    }

    /// トークンを読み込む（同期処理）
    ///
    /// 壊れたファイルはエラーにせず `None` として扱う
    fn load_credential_sync(path: &Path) -> Result<Option<CredentialJson>> {
        if !path.exists() {
            info!("No cached credential at {}", path.display());
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring unreadable cached credential {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        match serde_json::from_str::<CredentialJson>(&content) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable cached credential {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// トークンを保存する（同期処理）
    fn save_credential_sync(dir: &Path, path: &Path, credential: &CredentialJson) -> Result<()> {
        Self::ensure_dir(dir)?;

        let json = serde_json::to_string_pretty(credential)
            .context("Failed to serialize cached credential")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

        info!("Saved cached credential to {}", path.display());
        Ok(())
    }

    fn clear_credential_sync(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                info!("Removed cached credential {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
        }
    }

    /// JSON形式からDomain形式に変換
    fn to_domain(json: CredentialJson) -> CachedCredential {
        CachedCredential {
            access_token: json.access_token,
            refresh_token: json.refresh_token,
            token_type: json.token_type,
            expires_at: json.expires_at,
            scope: json.scope,
        }
    }

    /// Domain形式からJSON形式に変換
    fn from_domain(credential: &CachedCredential) -> CredentialJson {
        CredentialJson {
            access_token: credential.access_token.clone(),
            refresh_token: credential.refresh_token.clone(),
            token_type: credential.token_type.clone(),
            expires_at: credential.expires_at,
            scope: credential.scope.clone(),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
}

#[async_trait]
impl CredentialRepository for FileCredentialRepository {
    async fn has_client_config(&self) -> bool {
        let path = self.client_secrets_path.clone();
        run_blocking(move || Self::load_client_config_sync(&path))
            .await
            .is_ok()
    }

    async fn load_client_config(&self) -> Result<ClientConfig> {
        let path = self.client_secrets_path.clone();
        run_blocking(move || Self::load_client_config_sync(&path)).await
    }

    async fn save_client_config(&self, config: &ClientConfig) -> Result<()> {
        let dir = self.config_dir.clone();
        let path = self.client_secrets_path.clone();
        let raw = config.as_str().to_string();
        run_blocking(move || Self::save_client_config_sync(&dir, &path, &raw)).await
    }

    async fn has_cached_credential(&self) -> bool {
        tokio::fs::try_exists(&self.credential_path)
            .await
            .unwrap_or(false)
    }

    async fn load_cached_credential(&self) -> Result<Option<CachedCredential>> {
        let path = self.credential_path.clone();
        let json = run_blocking(move || Self::load_credential_sync(&path)).await?;
        Ok(json.map(Self::to_domain))
    }

    async fn save_cached_credential(&self, credential: &CachedCredential) -> Result<()> {
        let dir = self.config_dir.clone();
        let path = self.credential_path.clone();
        let json = Self::from_domain(credential);
        run_blocking(move || Self::save_credential_sync(&dir, &path, &json)).await
    }

    async fn clear_cached_credential(&self) -> Result<()> {
        let path = self.credential_path.clone();
        run_blocking(move || Self::clear_credential_sync(&path)).await
    }
}
