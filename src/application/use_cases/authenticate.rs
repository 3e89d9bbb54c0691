//! # Authenticate Use Case
//!
//! 認証ユースケース（キャッシュ再利用 → リフレッシュ → 同意フロー）

use anyhow::{Context, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use super::configure_client::ConfigureClientUseCase;
use crate::domain::entities::client_config::ClientSecrets;
use crate::domain::entities::credential::Session;
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::domain::repositories::oauth_repository::OAuthRepository;
use crate::domain::repositories::prompter::Prompter;

/// セッションの入手経路
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// 期限内のキャッシュをそのまま使用
    Cached,
    /// 期限切れのキャッシュをリフレッシュ
    Refreshed,
    /// 同意フローで新規取得
    Consent,
}

/// 認証結果
#[derive(Debug)]
pub struct AuthOutcome {
    pub session: Session,
    pub source: CredentialSource,
}

/// 認証ユースケース
pub struct AuthenticateUseCase<
    C: CredentialRepository + ?Sized,
    O: OAuthRepository + ?Sized,
    P: Prompter + ?Sized,
> {
    credential_repository: Arc<C>,
    oauth_repository: Arc<O>,
    prompter: Arc<P>,
    configure_client: ConfigureClientUseCase<C, P>,
}

impl<C, O, P> AuthenticateUseCase<C, O, P>
where
    C: CredentialRepository + ?Sized,
    O: OAuthRepository + ?Sized,
    P: Prompter + ?Sized,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `credential_repository` - 認証情報リポジトリ
    /// * `oauth_repository` - OAuthリポジトリ
    /// * `prompter` - 対話プロンプト
    pub fn new(credential_repository: Arc<C>, oauth_repository: Arc<O>, prompter: Arc<P>) -> Self {
        let configure_client =
            ConfigureClientUseCase::new(credential_repository.clone(), prompter.clone());

        Self {
            credential_repository,
            oauth_repository,
            prompter,
            configure_client,
        }
    }

    /// 認証済みセッションを取得する
    ///
    /// # Errors
    ///
    /// クライアント設定が得られない場合、リフレッシュ後の保存に失敗した場合、
    /// または同意フローが失敗した場合にエラーを返す。
    /// 期限切れ・破損したキャッシュはエラーにせず再認証する。
    pub async fn execute(&self) -> Result<AuthOutcome> {
        let config = self.configure_client.ensure().await?;
        let secrets = config.secrets()?;

        if let Some(cached) = self.credential_repository.load_cached_credential().await? {
            if !cached.is_expired(Utc::now()) {
                info!("Reusing cached credential");
                return Ok(AuthOutcome {
                    session: cached.session(),
                    source: CredentialSource::Cached,
                });
            }

            if cached.can_refresh() {
                // 同意フローに戻るのはトークンエンドポイントの失敗だけ
                match self.oauth_repository.refresh(&secrets, &cached).await {
                    Ok(refreshed) => {
                        self.credential_repository
                            .save_cached_credential(&refreshed)
                            .await
                            .context("Failed to save the refreshed credential")?;
                        return Ok(AuthOutcome {
                            session: refreshed.session(),
                            source: CredentialSource::Refreshed,
                        });
                    }
                    Err(e) => warn!("Token refresh failed, falling back to consent: {:#}", e),
                }
            } else {
                info!("Cached credential expired and has no refresh token");
            }
        }

        let session = self.consent(&secrets).await?;
        Ok(AuthOutcome {
            session,
            source: CredentialSource::Consent,
        })
    }

    async fn consent(&self, secrets: &ClientSecrets) -> Result<Session> {
        println!("Re-authenticating...");
        let url = self.oauth_repository.authorization_url(secrets)?;
        self.prompter
            .show_link("Go to the following link in your browser:", &url)
            .await?;

        let pasted = self.prompter.input("Enter verification code").await?;
        let credential = self
            .oauth_repository
            .exchange_code(secrets, pasted.trim())
            .await
            .context("Failed to exchange the authorization code")?;

        self.credential_repository
            .save_cached_credential(&credential)
            .await?;
        println!("✓ Authentication successful.");

        Ok(credential.session())
    }
}
