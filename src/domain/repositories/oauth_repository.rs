//! # OAuth Repository Trait
//!
//! 認可URLの生成とトークンエンドポイントとのやり取りを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::client_config::ClientSecrets;
use crate::domain::entities::credential::CachedCredential;

/// OAuthリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OAuthRepository: Send + Sync {
    /// ユーザーが同意するための認可URL
    fn authorization_url(&self, secrets: &ClientSecrets) -> Result<String>;

    /// 認可コードをトークンと交換する
    ///
    /// # Arguments
    ///
    /// * `secrets` - クライアントの識別情報
    /// * `pasted` - ユーザーが貼り付けた認可コード、またはリダイレクト先URL全体
    async fn exchange_code(&self, secrets: &ClientSecrets, pasted: &str)
        -> Result<CachedCredential>;

    /// リフレッシュトークンで新しいアクセストークンを取得する
    async fn refresh(
        &self,
        secrets: &ClientSecrets,
        credential: &CachedCredential,
    ) -> Result<CachedCredential>;
}
