//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **ClientConfig**: OAuthクライアント設定（形状チェック済み）
//! - **CachedCredential**: キャッシュされたトークンと `Session`
//! - **UploadTarget**: アップロード対象のパスと表示名

pub mod client_config;
pub mod credential;
pub mod upload_target;
