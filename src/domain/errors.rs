//! # Domain Errors
//!
//! 利用者に報告すべきエラーの型定義
//!
//! アダプター層・ユースケース層は `anyhow::Result` を返すが、
//! 終了コードやメッセージを切り替える必要があるエラーはここで型として定義し、
//! `downcast_ref` で判別できるようにする。

use std::path::PathBuf;
use thiserror::Error;

/// クライアント設定（client_secrets.json）の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientConfigError {
    #[error("client configuration is empty")]
    Empty,

    #[error("client configuration is too large ({0} bytes)")]
    TooLarge(usize),

    #[error("client configuration must start with '{{' and end with '}}'")]
    NotAnObject,

    #[error("client configuration has no 'installed' or 'web' section: {0}")]
    Unparseable(String),
}

/// アーカイブ作成エラー
///
/// どちらも実行全体を中断する致命的エラーとして扱う
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No space left to create a zip. Try uploading files individually.")]
    NoSpace { archive: PathBuf },

    #[error("cannot derive an archive name from {0}")]
    InvalidSource(PathBuf),

    #[error("Error while zipping {archive}: {source}")]
    Io {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveError {
    /// I/Oエラーを分類する（容量不足は専用のメッセージになる）
    pub fn from_io(archive: PathBuf, source: std::io::Error) -> Self {
        if is_no_space(&source) {
            ArchiveError::NoSpace { archive }
        } else {
            ArchiveError::Io { archive, source }
        }
    }
}

fn is_no_space(error: &std::io::Error) -> bool {
    error.kind() == std::io::ErrorKind::StorageFull
        || error.to_string().contains("No space left")
}

/// アプリケーション全体のエラー
#[derive(Debug, Error)]
pub enum GodriveError {
    #[error(transparent)]
    InvalidClientConfig(#[from] ClientConfigError),

    #[error("Too many failed attempts ({attempts}). Exiting...")]
    ConfigRetriesExhausted { attempts: u32 },

    #[error("no file path provided")]
    NoInput,

    #[error("File not found: {}", format_paths(.0))]
    PathNotFound(Vec<PathBuf>),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("Upload failed: {0}")]
    UploadFailed(PathBuf),

    #[error("Operation cancelled by user")]
    Cancelled,
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
