//! Godrive - Interactive Google Drive Uploader
//!
//! 対話形式でファイル・ディレクトリを Google Drive にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use clap::Parser;
use log::info;

use godrive::adapter::config::AppConfig;
use godrive::driver::exit::{is_cancelled, report_failure};
use godrive::driver::messages::{version_line, TOOL_INFO};
use godrive::driver::signal::interrupt_token;
use godrive::driver::{Args, Command, Dependencies, InteractiveWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    match args.command {
        Some(Command::Version) => {
            println!("{}", version_line());
            return ExitCode::SUCCESS;
        }
        Some(Command::Info) => {
            println!("{}", TOOL_INFO);
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let config = match AppConfig::resolve(args.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };
    info!("Using configuration directory {}", config.config_dir().display());

    let cancel = interrupt_token();
    let workflow = InteractiveWorkflow::new(Dependencies::production(&config));

    match workflow.execute(&cancel).await {
        Ok(summary) => {
            info!(
                "Finished: {} uploaded, {} failed",
                summary.total() - summary.failed_count(),
                summary.failed_count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = report_failure(&e);
            if is_cancelled(&e) {
                // 入力待ちのブロッキングタスクを待たずに終了する
                std::process::exit(1);
            }
            code
        }
    }
}
