//! # ClientConfig Value Object
//!
//! OAuthクライアント設定（client_secrets.json）のバリューオブジェクト

use serde::Deserialize;

use crate::domain::errors::ClientConfigError;

/// 受け付ける設定の最大サイズ（この値未満）
pub const MAX_CLIENT_CONFIG_LEN: usize = 5000;

/// 粗い形状チェックのみを行う
///
/// 空でなく、5000バイト未満で、`{` で始まり `}` で終わること
pub fn validate_client_config(content: &str) -> Result<(), ClientConfigError> {
    let bytes = content.as_bytes();
    if bytes.is_empty() {
        return Err(ClientConfigError::Empty);
    }
    if bytes.len() >= MAX_CLIENT_CONFIG_LEN {
        return Err(ClientConfigError::TooLarge(bytes.len()));
    }
    if bytes[0] != b'{' || bytes[bytes.len() - 1] != b'}' {
        return Err(ClientConfigError::NotAnObject);
    }
    Ok(())
}

/// 検証済みのクライアント設定
///
/// 内容はユーザーが貼り付けたものをそのまま保持し、ディスクにもそのまま保存する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    raw: String,
}

impl ClientConfig {
    /// 形状チェックを通過した場合のみ生成する
    pub fn parse(content: &str) -> Result<Self, ClientConfigError> {
        validate_client_config(content)?;
        Ok(Self {
            raw: content.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Googleのclient secrets形式として解釈する
    ///
    /// `installed`（デスクトップアプリ）を優先し、なければ `web` を使う
    pub fn secrets(&self) -> Result<ClientSecrets, ClientConfigError> {
        let file: ClientSecretsFile = serde_json::from_str(&self.raw)
            .map_err(|e| ClientConfigError::Unparseable(e.to_string()))?;

        file.installed
            .or(file.web)
            .ok_or_else(|| ClientConfigError::Unparseable("missing section".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

/// OAuthクライアントの識別情報
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub auth_uri: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}
