//! # Archiver Trait
//!
//! ディレクトリを単一のアーカイブファイルにまとめる処理を抽象化

use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::domain::errors::ArchiveError;

/// アーカイブ結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// アーカイブファイルのパス
    pub path: PathBuf,
    /// 既存のアーカイブを再利用したか
    pub reused: bool,
}

/// アーカイバ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Archiver: Send + Sync {
    /// ディレクトリのアーカイブを用意する
    ///
    /// 導出された名前のアーカイブが既に存在すれば作り直さずに返す
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合（容量不足を含む）に `ArchiveError` を返す
    async fn ensure_archive(&self, directory: &Path) -> Result<ArchiveOutcome, ArchiveError>;
}
