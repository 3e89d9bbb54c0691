//! # Configure Client Use Case
//!
//! クライアント設定の取得ユースケース

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::entities::client_config::ClientConfig;
use crate::domain::errors::GodriveError;
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::domain::repositories::prompter::Prompter;

/// 貼り付けの試行回数の上限
pub const MAX_CONFIG_ATTEMPTS: u32 = 3;

const PASTE_PROMPT: &str =
    "Paste your client_secrets.json content (press Enter on an empty line to finish)";

/// クライアント設定ユースケース
///
/// 保存済みの設定を読み込むか、利用者に貼り付けてもらって保存する
pub struct ConfigureClientUseCase<C: CredentialRepository + ?Sized, P: Prompter + ?Sized> {
    credential_repository: Arc<C>,
    prompter: Arc<P>,
}

impl<C: CredentialRepository + ?Sized, P: Prompter + ?Sized> ConfigureClientUseCase<C, P> {
    /// 新しいユースケースを作成
    pub fn new(credential_repository: Arc<C>, prompter: Arc<P>) -> Self {
        Self {
            credential_repository,
            prompter,
        }
    }

    /// 有効な設定を返す（なければ問い合わせる）
    ///
    /// # Errors
    ///
    /// 3回続けて不正な内容が貼り付けられた場合に
    /// `GodriveError::ConfigRetriesExhausted` を返す
    pub async fn ensure(&self) -> Result<ClientConfig> {
        if self.credential_repository.has_client_config().await {
            return self.credential_repository.load_client_config().await;
        }

        println!("⚠ Missing or invalid client_secrets.json. You need to provide a new one.");
        self.prompt_and_save().await
    }

    /// 設定を貼り付けてもらい、検証して保存する
    pub async fn prompt_and_save(&self) -> Result<ClientConfig> {
        for attempt in 1..=MAX_CONFIG_ATTEMPTS {
            let pasted = self.prompter.paste_block(PASTE_PROMPT).await?;
            println!("Verifying...");

            // 改行だけを落とし、それ以外の空白は検証にかける
            match ClientConfig::parse(pasted.trim_end_matches(['\r', '\n'])) {
                Ok(config) => {
                    self.credential_repository.save_client_config(&config).await?;
                    info!("Saved client configuration (attempt {})", attempt);
                    println!("✓ Successfully verified and saved.");
                    return Ok(config);
                }
                Err(e) => {
                    warn!("Rejected client configuration: {}", e);
                    println!("✗ Invalid client_secrets.json format. Please try again.");
                }
            }
        }

        Err(GodriveError::ConfigRetriesExhausted {
            attempts: MAX_CONFIG_ATTEMPTS,
        }
        .into())
    }
}
