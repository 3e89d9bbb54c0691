//! Adapter Layer
//!
//! 外部システム（Google OAuth, Google Drive, ファイルシステム, 端末）との統合

pub mod archive;
pub mod auth;
pub mod config;
pub mod drive;
pub mod prompt;
pub mod repositories;
