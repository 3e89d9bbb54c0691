//! Hand-written test doubles shared by the integration tests

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use godrive::adapter::archive::ZipArchiver;
use godrive::adapter::config::AppConfig;
use godrive::adapter::repositories::FileCredentialRepository;
use godrive::domain::entities::client_config::ClientSecrets;
use godrive::domain::entities::credential::{CachedCredential, Session};
use godrive::domain::repositories::credential_repository::CredentialRepository;
use godrive::domain::repositories::drive_repository::{DriveRepository, RemoteFile};
use godrive::domain::repositories::oauth_repository::OAuthRepository;
use godrive::domain::repositories::prompter::Prompter;
use godrive::driver::Dependencies;

/// Path to test fixtures
pub fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn client_secrets_fixture() -> String {
    fs::read_to_string(fixtures_path().join("client_secrets.json"))
        .expect("client_secrets.json fixture should exist")
}

pub fn valid_credential() -> CachedCredential {
    CachedCredential {
        access_token: "ya29.test".to_string(),
        refresh_token: Some("1//refresh".to_string()),
        token_type: "Bearer".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        scope: None,
    }
}

/// Writes client_secrets.json and auth.txt into `config_dir`
pub async fn signed_in(config: &AppConfig) {
    fs::create_dir_all(config.config_dir()).unwrap();
    fs::write(config.client_secrets_path(), client_secrets_fixture()).unwrap();
    FileCredentialRepository::new(config)
        .save_cached_credential(&valid_credential())
        .await
        .unwrap();
}

/// Prompter answering from pre-recorded queues
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: Mutex<VecDeque<String>>,
    confirms: Mutex<VecDeque<bool>>,
    pastes: Mutex<VecDeque<String>>,
    pub links: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(self, answer: impl Into<String>) -> Self {
        self.inputs.lock().unwrap().push_back(answer.into());
        self
    }

    pub fn with_confirm(self, answer: bool) -> Self {
        self.confirms.lock().unwrap().push_back(answer);
        self
    }

    pub fn with_paste(self, answer: impl Into<String>) -> Self {
        self.pastes.lock().unwrap().push_back(answer.into());
        self
    }

    pub fn unused_answers(&self) -> usize {
        self.inputs.lock().unwrap().len()
            + self.confirms.lock().unwrap().len()
            + self.pastes.lock().unwrap().len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn input(&self, prompt: &str) -> Result<String> {
        match self.inputs.lock().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected input prompt: {}", prompt),
        }
    }

    async fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.confirms.lock().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected confirm prompt: {}", prompt),
        }
    }

    async fn paste_block(&self, prompt: &str) -> Result<String> {
        match self.pastes.lock().unwrap().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected paste prompt: {}", prompt),
        }
    }

    async fn show_link(&self, _message: &str, url: &str) -> Result<()> {
        self.links.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Drive double recording every upload
#[derive(Default)]
pub struct RecordingDrive {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl RecordingDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl DriveRepository for RecordingDrive {
    async fn create_file(&self, _session: &Session, name: &str, content: Vec<u8>) -> Result<RemoteFile> {
        if self.fail {
            bail!("Drive API error 500: Backend Error");
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((name.to_string(), content));
        Ok(RemoteFile {
            id: format!("file-{}", uploads.len()),
            name: name.to_string(),
        })
    }
}

/// OAuth double handing out a fixed credential
#[derive(Default)]
pub struct StubOAuth {
    pub exchanged_codes: Mutex<Vec<String>>,
}

#[async_trait]
impl OAuthRepository for StubOAuth {
    fn authorization_url(&self, secrets: &ClientSecrets) -> Result<String> {
        Ok(format!("https://accounts.example/auth?client_id={}", secrets.client_id))
    }

    async fn exchange_code(&self, _secrets: &ClientSecrets, pasted: &str) -> Result<CachedCredential> {
        self.exchanged_codes.lock().unwrap().push(pasted.to_string());
        Ok(valid_credential())
    }

    async fn refresh(
        &self,
        _secrets: &ClientSecrets,
        _credential: &CachedCredential,
    ) -> Result<CachedCredential> {
        Ok(valid_credential())
    }
}

/// Real credential files and archiver, doubled network and terminal
pub fn test_dependencies(
    config: &AppConfig,
    drive: Arc<RecordingDrive>,
    oauth: Arc<StubOAuth>,
    prompter: Arc<ScriptedPrompter>,
) -> Dependencies {
    Dependencies {
        credentials: Arc::new(FileCredentialRepository::new(config)),
        oauth,
        drive,
        archiver: Arc::new(ZipArchiver::new()),
        prompter,
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
