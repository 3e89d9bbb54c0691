//! # Upload File Use Case
//!
//! ファイル（またはディレクトリのアーカイブ）のアップロードユースケース

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::application::dto::upload_report::UploadReport;
use crate::domain::entities::credential::Session;
use crate::domain::entities::upload_target::UploadTarget;
use crate::domain::errors::GodriveError;
use crate::domain::repositories::archiver::Archiver;
use crate::domain::repositories::drive_repository::DriveRepository;

/// ファイルアップロードユースケース
///
/// ディレクトリはアーカイブに変換してからアップロードし、
/// 成功時にはそのアーカイブをローカルから削除する
pub struct UploadFileUseCase<D: DriveRepository + ?Sized, A: Archiver + ?Sized> {
    drive_repository: Arc<D>,
    archiver: Arc<A>,
}

impl<D: DriveRepository + ?Sized, A: Archiver + ?Sized> UploadFileUseCase<D, A> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `drive_repository` - ドライブリポジトリ
    /// * `archiver` - アーカイバ
    pub fn new(drive_repository: Arc<D>, archiver: Arc<A>) -> Self {
        Self {
            drive_repository,
            archiver,
        }
    }

    /// 1件アップロードする
    ///
    /// # Returns
    ///
    /// アップロード結果。I/OエラーやAPIエラーは `success: false` として返す
    ///
    /// # Errors
    ///
    /// アーカイブ作成に失敗した場合のみ `GodriveError::Archive` を返す（致命的）
    pub async fn execute(&self, session: &Session, target: &UploadTarget) -> Result<UploadReport> {
        let source = target.path().to_path_buf();

        let metadata = match tokio::fs::metadata(&source).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("{} is not accessible: {}", source.display(), e);
                println!("✗ Error: File does not exist: {}", source.display());
                return Ok(UploadReport::failed(source));
            }
        };

        let (upload_file, archived) = if metadata.is_dir() {
            println!("Preparing a zip of {}...", source.display());
            let outcome = self
                .archiver
                .ensure_archive(&source)
                .await
                .map_err(GodriveError::from)?;
            if outcome.reused {
                println!("Using existing zip: {}", outcome.path.display());
            } else {
                println!("Zip created: {}", outcome.path.display());
            }
            (outcome.path, true)
        } else {
            (source.clone(), false)
        };

        let remote_name = target.remote_name_for(&upload_file);

        println!("Uploading {} as {}...", upload_file.display(), remote_name);
        let content = match tokio::fs::read(&upload_file).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", upload_file.display(), e);
                println!("✗ Upload failed: {}", e);
                return Ok(UploadReport {
                    uploaded_file: Some(upload_file),
                    remote_name: Some(remote_name),
                    archived,
                    ..UploadReport::failed(source)
                });
            }
        };

        info!(
            "Uploading {} bytes from {}",
            content.len(),
            upload_file.display()
        );

        match self
            .drive_repository
            .create_file(session, &remote_name, content)
            .await
        {
            Ok(remote) => {
                println!("✓ Upload complete! File uploaded with name: {}", remote.name);

                if archived {
                    if let Err(e) = tokio::fs::remove_file(&upload_file).await {
                        warn!(
                            "Failed to remove archive {}: {}",
                            upload_file.display(),
                            e
                        );
                    }
                }

                Ok(UploadReport {
                    source,
                    uploaded_file: Some(upload_file),
                    remote_name: Some(remote.name),
                    remote_id: Some(remote.id),
                    archived,
                    success: true,
                })
            }
            Err(e) => {
                warn!("Upload of {} failed: {:#}", upload_file.display(), e);
                println!("✗ Upload failed: {:#}", e);

                Ok(UploadReport {
                    uploaded_file: Some(upload_file),
                    remote_name: Some(remote_name),
                    archived,
                    ..UploadReport::failed(source)
                })
            }
        }
    }
}
