//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ConfigureClientUseCase**: クライアント設定の取得と保存
//! - **AuthenticateUseCase**: 認証（キャッシュ再利用・リフレッシュ・同意フロー）
//! - **UploadFileUseCase**: ファイル/ディレクトリのアップロード

pub mod authenticate;
pub mod configure_client;
pub mod upload_file;
