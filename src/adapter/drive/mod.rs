//! Google Drive Adapter Modules
//!
//! Google Drive REST API v3 との統合

pub mod client;
pub mod models;

pub use client::GoogleDriveClient;
