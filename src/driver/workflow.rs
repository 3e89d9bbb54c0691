//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::Result;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::adapter::archive::ZipArchiver;
use crate::adapter::auth::GoogleOAuthClient;
use crate::adapter::config::AppConfig;
use crate::adapter::drive::GoogleDriveClient;
use crate::adapter::prompt::DialoguerPrompter;
use crate::adapter::repositories::FileCredentialRepository;
use crate::application::dto::upload_report::{BatchSummary, UploadReport};
use crate::application::use_cases::authenticate::{AuthenticateUseCase, CredentialSource};
use crate::application::use_cases::configure_client::ConfigureClientUseCase;
use crate::application::use_cases::upload_file::UploadFileUseCase;
use crate::domain::entities::credential::Session;
use crate::domain::entities::upload_target::UploadTarget;
use crate::domain::errors::GodriveError;
use crate::domain::repositories::archiver::Archiver;
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::domain::repositories::drive_repository::DriveRepository;
use crate::domain::repositories::oauth_repository::OAuthRepository;
use crate::domain::repositories::prompter::Prompter;
use crate::domain::services::path_resolver::PathResolver;

use super::signal::run_until_cancelled;

const PATHS_PROMPT: &str =
    "Enter the path(s) of the file(s)/directory to upload (separate multiple with '$')";
const NAME_PROMPT: &str =
    "Enter an optional name for the uploaded file (leave blank to keep the original name)";
const CHANGE_CONFIG_PROMPT: &str =
    "✓ Valid client_secrets.json found. Do you want to change it?";
const SAME_ACCOUNT_PROMPT: &str =
    "Previous upload was done on a saved account. Do you want to use the same account?";

/// Collaborators shared by both front-ends
#[derive(Clone)]
pub struct Dependencies {
    pub credentials: Arc<dyn CredentialRepository>,
    pub oauth: Arc<dyn OAuthRepository>,
    pub drive: Arc<dyn DriveRepository>,
    pub archiver: Arc<dyn Archiver>,
    pub prompter: Arc<dyn Prompter>,
}

impl Dependencies {
    /// Wire the real adapters for `config`
    pub fn production(config: &AppConfig) -> Self {
        Self {
            credentials: Arc::new(FileCredentialRepository::new(config)),
            oauth: Arc::new(GoogleOAuthClient::new(config.scope.clone())),
            drive: Arc::new(GoogleDriveClient::new(config.drive_upload_url.clone())),
            archiver: Arc::new(ZipArchiver::new()),
            prompter: Arc::new(DialoguerPrompter::new()),
        }
    }

    async fn authenticate(&self) -> Result<Session> {
        let outcome = AuthenticateUseCase::new(
            self.credentials.clone(),
            self.oauth.clone(),
            self.prompter.clone(),
        )
        .execute()
        .await?;

        if outcome.source == CredentialSource::Cached {
            println!("✓ Using existing authentication.");
        }
        info!("Authenticated ({:?})", outcome.source);
        Ok(outcome.session)
    }

    fn uploader(&self) -> UploadFileUseCase<dyn DriveRepository, dyn Archiver> {
        UploadFileUseCase::new(self.drive.clone(), self.archiver.clone())
    }
}

/// Every path that does not exist, in input order
async fn missing_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut missing = Vec::new();
    for path in paths {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            missing.push(path.clone());
        }
    }
    missing
}

/// Interactive Workflow (`godrive`)
pub struct InteractiveWorkflow {
    deps: Dependencies,
}

impl InteractiveWorkflow {
    pub fn new(deps: Dependencies) -> Self {
        Self { deps }
    }

    /// Run the interactive session until done or interrupted
    pub async fn execute(&self, cancel: &CancellationToken) -> Result<BatchSummary> {
        run_until_cancelled(cancel, self.run()).await
    }

    async fn run(&self) -> Result<BatchSummary> {
        println!("Welcome to Godrive CLI!");
        self.setup_client_config().await?;

        let input = self.deps.prompter.input(PATHS_PROMPT).await?;
        let pieces = PathResolver::split(&input);
        if pieces.is_empty() {
            println!("✗ Error: No file path provided.");
            return Err(GodriveError::NoInput.into());
        }

        let paths = PathResolver::resolve(&pieces);
        let missing = missing_paths(&paths).await;
        if !missing.is_empty() {
            for path in &missing {
                println!("✗ Error: File not found -> {}", path.display());
            }
            return Err(GodriveError::PathNotFound(missing).into());
        }

        // 表示名を付けられるのは単一パスのときだけ
        let display_name = match paths.as_slice() {
            [_] => Some(self.deps.prompter.input(NAME_PROMPT).await?),
            _ => None,
        };

        self.confirm_account().await?;
        let session = self.deps.authenticate().await?;

        let uploader = self.deps.uploader();
        let mut summary = BatchSummary::default();
        for path in paths {
            let report = uploader
                .execute(&session, &UploadTarget::new(path, display_name.clone()))
                .await?;
            summary.push(report);
        }

        if summary.is_success() {
            println!("\n✓ All files uploaded successfully!");
        } else {
            println!(
                "\n⚠ {} of {} uploads failed",
                summary.failed_count(),
                summary.total()
            );
        }

        Ok(summary)
    }

    async fn setup_client_config(&self) -> Result<()> {
        let configure =
            ConfigureClientUseCase::new(self.deps.credentials.clone(), self.deps.prompter.clone());

        if self.deps.credentials.has_client_config().await {
            if self.deps.prompter.confirm(CHANGE_CONFIG_PROMPT, false).await? {
                configure.prompt_and_save().await?;
            } else {
                println!("✓ Using existing client_secrets.json.");
            }
        } else {
            configure.ensure().await?;
        }
        Ok(())
    }

    async fn confirm_account(&self) -> Result<()> {
        if !self.deps.credentials.has_cached_credential().await {
            return Ok(());
        }

        if !self.deps.prompter.confirm(SAME_ACCOUNT_PROMPT, true).await? {
            self.deps.credentials.clear_cached_credential().await?;
            println!("Old authentication removed. You will need to authenticate again.");
        }
        Ok(())
    }
}

/// Script Workflow (`godrive-upload <path> [display_name]`)
pub struct ScriptWorkflow {
    deps: Dependencies,
}

impl ScriptWorkflow {
    pub fn new(deps: Dependencies) -> Self {
        Self { deps }
    }

    /// Upload one path; a failed upload is an error
    pub async fn execute(
        &self,
        path: &str,
        display_name: Option<String>,
        cancel: &CancellationToken,
    ) -> Result<UploadReport> {
        run_until_cancelled(cancel, self.run(path, display_name)).await
    }

    async fn run(&self, path: &str, display_name: Option<String>) -> Result<UploadReport> {
        let target = UploadTarget::new(path, display_name);

        println!("Uploading: {}", path);
        println!(
            "\tUpload Name: {}",
            target.display_name().unwrap_or("Using original name")
        );

        let missing = missing_paths(&[target.path().to_path_buf()]).await;
        if !missing.is_empty() {
            println!("✗ Error: File does not exist: {}", path);
            return Err(GodriveError::PathNotFound(missing).into());
        }

        let session = self.deps.authenticate().await?;
        let report = self.deps.uploader().execute(&session, &target).await?;

        if !report.success {
            println!("✗ Upload failed. Please try again.");
            return Err(GodriveError::UploadFailed(target.path().to_path_buf()).into());
        }
        Ok(report)
    }
}
