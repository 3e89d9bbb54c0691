//! Dialoguer Prompter
//!
//! dialoguerによる端末プロンプト
//!
//! 入力待ちはstdinをブロックするため、ブロッキングプールで実行する。

use anyhow::{Context, Result};
use async_trait::async_trait;
use dialoguer::{Confirm, Input};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::adapter::auth::browser::open_browser;
use crate::domain::repositories::prompter::Prompter;

#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .context("Prompt task failed")?
}

/// Reads one line from a non-interactive stdin
fn read_line(reader: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Collects lines until the first empty line or end of input
pub fn read_block(reader: &mut impl BufRead) -> Result<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).context("Failed to read input")?;
        let line = line.trim_end_matches(['\r', '\n']);
        if read == 0 || line.trim().is_empty() {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

/// Interprets a y/n answer; anything else is the default
pub fn parse_yes_no(answer: &str, default: bool) -> bool {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

#[async_trait]
impl Prompter for DialoguerPrompter {
    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn input(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_string();
        blocking(move || {
            if io::stdin().is_terminal() {
                Input::<String>::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()
                    .context("Failed to read input")
            } else {
                print!("{}: ", prompt);
                io::stdout().flush().ok();
                read_line(&mut io::stdin().lock())
            }
        })
        .await
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let prompt = prompt.to_string();
        blocking(move || {
            if io::stdin().is_terminal() {
                Confirm::new()
                    .with_prompt(prompt)
                    .default(default)
                    .interact()
                    .context("Failed to read confirmation")
            } else {
                print!("{} [{}]: ", prompt, if default { "Y/n" } else { "y/N" });
                io::stdout().flush().ok();
                let answer = read_line(&mut io::stdin().lock())?;
                Ok(parse_yes_no(&answer, default))
            }
        })
        .await
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn paste_block(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_string();
        blocking(move || {
            println!("{}:", prompt);
            read_block(&mut io::stdin().lock())
        })
        .await
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    async fn show_link(&self, message: &str, url: &str) -> Result<()> {
        println!("{}\n\n    {}\n", message, url);
        if !open_browser(url) {
            log::debug!("No browser could be opened");
        }
        Ok(())
    }
}
