//! Authentication Module
//!
//! Google OAuth関連の機能

pub mod browser;
pub mod google_oauth;

pub use google_oauth::GoogleOAuthClient;
