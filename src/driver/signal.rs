//! Interrupt handling
//!
//! Ctrl+C をキャンセルトークンに変換する

use anyhow::Result;
use log::{debug, warn};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::domain::errors::GodriveError;

/// Ctrl+C で取り消されるトークンを作成する
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn interrupt_token() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                debug!("Interrupt received");
                child.cancel();
            }
            Err(e) => warn!("Unable to listen for Ctrl+C: {}", e),
        }
    });

    token
}

/// トークンが取り消されたら `GodriveError::Cancelled` で打ち切る
pub async fn run_until_cancelled<T, F>(cancel: &CancellationToken, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(GodriveError::Cancelled.into()),
        result = work => result,
    }
}
