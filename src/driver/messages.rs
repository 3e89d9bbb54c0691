//! User-facing fixed texts.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const TOOL_INFO: &str = "
Godrive CLI Tool
----------------
A command-line tool to easily upload files and directories to Google Drive.

Features:
- First-time setup for Google authentication
- Supports file and directory uploads (directories are zipped on the fly)
- Reuses the saved authentication between runs
";

pub fn version_line() -> String {
    format!("Godrive CLI Version: {}", VERSION)
}
