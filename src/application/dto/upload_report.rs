//! # Upload Report DTO
//!
//! 1ファイル分のアップロード結果と、複数ファイル実行のサマリー

use std::path::PathBuf;

/// 1ファイル分のアップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// 利用者が指定したパス
    pub source: PathBuf,
    /// 実際に送ったファイル（ディレクトリの場合はアーカイブ）
    pub uploaded_file: Option<PathBuf>,
    /// リモート上の名前
    pub remote_name: Option<String>,
    /// リモートファイルID
    pub remote_id: Option<String>,
    /// アーカイブから作られたアップロードか
    pub archived: bool,
    /// 成功したか
    pub success: bool,
}

impl UploadReport {
    /// 失敗結果を作成
    pub fn failed(source: PathBuf) -> Self {
        Self {
            source,
            uploaded_file: None,
            remote_name: None,
            remote_id: None,
            archived: false,
            success: false,
        }
    }
}

/// 複数ファイル実行のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub reports: Vec<UploadReport>,
}

impl BatchSummary {
    pub fn push(&mut self, report: UploadReport) {
        self.reports.push(report);
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn failed_count(&self) -> usize {
        self.reports.iter().filter(|r| !r.success).count()
    }

    /// 全件成功したか（0件の場合も `true`）
    ///
    /// # 例
    ///
    /// ```
    /// use godrive::application::dto::upload_report::{BatchSummary, UploadReport};
    /// use std::path::PathBuf;
    ///
    /// let mut summary = BatchSummary::default();
    /// assert!(summary.is_success());
    ///
    /// summary.push(UploadReport::failed(PathBuf::from("a.txt")));
    /// assert!(!summary.is_success());
    /// assert_eq!(summary.failed_count(), 1);
    /// ```
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}
