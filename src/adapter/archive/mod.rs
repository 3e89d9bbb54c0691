//! Archive Adapter Modules
//!
//! ディレクトリのzipアーカイブ作成

pub mod zip_archiver;

pub use zip_archiver::ZipArchiver;
