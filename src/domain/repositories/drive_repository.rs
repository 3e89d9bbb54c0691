//! # Drive Repository Trait
//!
//! リモートストレージへのファイル作成を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::credential::Session;

/// 作成されたリモートファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

/// ドライブリポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DriveRepository: Send + Sync {
    /// ファイルを作成し、内容を1回のリクエストでアップロードする
    ///
    /// # Arguments
    ///
    /// * `session` - 認証済みセッション
    /// * `name` - リモート上の表示名
    /// * `content` - ファイルの内容（全体）
    ///
    /// # Errors
    ///
    /// 通信エラーまたはAPIエラーの場合にエラーを返す（リトライはしない）
    async fn create_file(&self, session: &Session, name: &str, content: Vec<u8>)
        -> Result<RemoteFile>;
}
