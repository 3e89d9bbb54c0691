//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - ネットワークやUIに依存しない
//! - Google Drive や OAuth の詳細を知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（ClientConfig, CachedCredential, UploadTargetなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（パス解決、アーカイブ名の導出）
//! - **errors**: 利用者に報告するエラー型

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
