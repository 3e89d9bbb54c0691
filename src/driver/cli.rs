//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

/// Google Driveにファイル・ディレクトリをアップロードする対話型CLI
#[derive(Parser, Debug, Clone)]
#[command(name = "godrive", version)]
#[command(about = "Upload files and directories to Google Drive", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding client_secrets.json and auth.txt (default: ~/.godrive)
    #[arg(long, env = "GODRIVE_DIR", global = true)]
    pub config_dir: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the version
    Version,
    /// Describe the tool
    Info,
}

/// スクリプト向けの単発アップロードCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "godrive-upload", version)]
#[command(about = "Upload one file or directory to Google Drive", long_about = None)]
pub struct UploadArgs {
    /// File or directory to upload
    pub path: String,

    /// Name to use on Drive (the original extension is kept)
    pub display_name: Option<String>,

    /// Directory holding client_secrets.json and auth.txt (default: ~/.godrive)
    #[arg(long, env = "GODRIVE_DIR")]
    pub config_dir: Option<String>,
}
