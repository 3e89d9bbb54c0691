//! Exit code mapping
//!
//! 致命的エラーを利用者向けのメッセージと終了コードに変換する

use std::process::ExitCode;

use crate::domain::errors::GodriveError;

pub const GOODBYE: &str = "Exiting gracefully... Goodbye!";

/// 致命的エラーを報告し、終了コードを返す
///
/// 各ステップで既に表示済みのエラー（パス不在など）は繰り返さない
pub fn report_failure(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<GodriveError>() {
        Some(GodriveError::Cancelled) => println!("\n{}", GOODBYE),
        Some(GodriveError::PathNotFound(_))
        | Some(GodriveError::NoInput)
        | Some(GodriveError::UploadFailed(_)) => {}
        Some(other) => println!("✗ {}", other),
        None => println!("✗ Error: {:#}", err),
    }
    log::debug!("Fatal error: {:?}", err);
    ExitCode::FAILURE
}

/// 中断（Ctrl+C）によるエラーかどうか
pub fn is_cancelled(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<GodriveError>(),
        Some(GodriveError::Cancelled)
    )
}
