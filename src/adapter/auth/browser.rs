//! Browser Launcher
//!
//! 既定のブラウザでURLを開く

use std::process::{Command, Stdio};

/// Detects WSL by looking for "microsoft" in `/proc/version`
#[cfg(target_os = "linux")]
fn is_wsl() -> bool {
    std::fs::read_to_string("/proc/version")
        .map(|version| {
            let version = version.to_lowercase();
            version.contains("microsoft") || version.contains("wsl")
        })
        .unwrap_or(false)
}

fn spawn_quiet(command: &mut Command) -> bool {
    command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .is_ok()
}

/// Open `url` in the default browser
///
/// Returns `false` when no launcher could be started. Callers always print the
/// URL as well, so a headless machine still gets a usable link.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn open_browser(url: &str) -> bool {
    #[cfg(target_os = "windows")]
    {
        spawn_quiet(Command::new("cmd").args(["/c", "start", "", url]))
    }

    #[cfg(target_os = "macos")]
    {
        spawn_quiet(Command::new("open").arg(url))
    }

    #[cfg(target_os = "linux")]
    {
        if is_wsl() {
            spawn_quiet(Command::new("wslview").arg(url))
                || spawn_quiet(
                    Command::new("cmd.exe")
                        .current_dir("/mnt/c/")
                        .args(["/c", "start", "", url]),
                )
        } else {
            spawn_quiet(Command::new("xdg-open").arg(url))
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = url;
        false
    }
}
