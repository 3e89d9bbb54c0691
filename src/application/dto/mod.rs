//! # DTOs
//!
//! ユースケースとDriver層の間で受け渡すデータ

pub mod upload_report;
