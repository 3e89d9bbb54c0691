//! # Credential Repository Trait
//!
//! クライアント設定とキャッシュ済みトークンの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::client_config::ClientConfig;
use crate::domain::entities::credential::CachedCredential;

/// 認証情報リポジトリ
///
/// ユーザーごとの設定ディレクトリ配下の2ファイルを扱う
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// 有効な形状のクライアント設定が保存されているか
    async fn has_client_config(&self) -> bool;

    /// クライアント設定を読み込む
    ///
    /// # Errors
    ///
    /// ファイルが存在しない、または形状チェックに失敗した場合にエラーを返す
    async fn load_client_config(&self) -> Result<ClientConfig>;

    /// クライアント設定をそのまま保存する
    async fn save_client_config(&self, config: &ClientConfig) -> Result<()>;

    /// キャッシュ済みトークンのファイルが存在するか
    async fn has_cached_credential(&self) -> bool;

    /// キャッシュ済みトークンを読み込む
    ///
    /// # Returns
    ///
    /// ファイルがない、または壊れている場合は `None`
    async fn load_cached_credential(&self) -> Result<Option<CachedCredential>>;

    /// トークンを保存する（既存のものは置き換える）
    async fn save_cached_credential(&self, credential: &CachedCredential) -> Result<()>;

    /// キャッシュ済みトークンを削除する
    async fn clear_cached_credential(&self) -> Result<()>;
}
