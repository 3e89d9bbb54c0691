//! Godrive Upload - Scripted Google Drive Uploader
//!
//! `godrive-upload <path> [display_name]` で1件アップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::process::ExitCode;

use clap::Parser;
use log::info;

use godrive::adapter::config::AppConfig;
use godrive::driver::exit::{is_cancelled, report_failure};
use godrive::driver::signal::interrupt_token;
use godrive::driver::{Dependencies, ScriptWorkflow, UploadArgs};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match UploadArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            // --help / --version は成功扱い、使い方の誤りは 1
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match AppConfig::resolve(args.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };

    let cancel = interrupt_token();
    let workflow = ScriptWorkflow::new(Dependencies::production(&config));

    match workflow
        .execute(&args.path, args.display_name, &cancel)
        .await
    {
        Ok(report) => {
            info!("Uploaded {}", report.source.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = report_failure(&e);
            if is_cancelled(&e) {
                std::process::exit(1);
            }
            code
        }
    }
}
