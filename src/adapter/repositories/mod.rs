//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod file_credential_repository;

pub use file_credential_repository::FileCredentialRepository;
