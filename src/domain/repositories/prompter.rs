//! # Prompter Trait
//!
//! 利用者への問い合わせを抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// 対話プロンプト
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Prompter: Send + Sync {
    /// 1行入力を受け取る
    async fn input(&self, prompt: &str) -> Result<String>;

    /// y/n で確認する
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// 空行が入力されるまで複数行を受け取り、改行で連結して返す
    async fn paste_block(&self, prompt: &str) -> Result<String>;

    /// URLを表示し、可能ならブラウザで開く
    async fn show_link(&self, message: &str, url: &str) -> Result<()>;
}
