//! Prompt Adapter Modules
//!
//! 端末での対話入力

pub mod dialoguer_prompter;

pub use dialoguer_prompter::DialoguerPrompter;
