//! # Driver Layer (Presentation)
//!
//! CLIやその他の外部インターフェースを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **messages**: バージョン・ツール説明の固定文言
//! - **signal**: Ctrl+C によるキャンセル
//! - **workflow**: ワークフロー全体のオーケストレーション
//! - **exit**: エラーから終了コードへの変換

pub mod cli;
pub mod exit;
pub mod messages;
pub mod signal;
pub mod workflow;

pub use cli::{Args, Command, UploadArgs};
pub use workflow::{Dependencies, InteractiveWorkflow, ScriptWorkflow};
