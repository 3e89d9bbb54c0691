//! # UploadTarget Value Object
//!
//! アップロード対象（ローカルパスと任意の表示名）

use std::path::{Path, PathBuf};

/// アップロード対象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    path: PathBuf,
    display_name: Option<String>,
}

impl UploadTarget {
    /// 新しいアップロード対象を作成
    ///
    /// 空白のみの表示名は指定なしとして扱う
    pub fn new(path: impl Into<PathBuf>, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Self {
            path: path.into(),
            display_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// 実際にアップロードするファイルに対するリモート上の名前
    ///
    /// 表示名が指定されていれば `表示名 + 元の拡張子`、
    /// なければ元のファイル名をそのまま使う
    ///
    /// # 例
    ///
    /// ```
    /// use godrive::domain::entities::upload_target::UploadTarget;
    /// use std::path::Path;
    ///
    /// let plain = UploadTarget::new("/docs/report.pdf", None);
    /// assert_eq!(plain.remote_name_for(Path::new("/docs/report.pdf")), "report.pdf");
    ///
    /// let renamed = UploadTarget::new("/docs/report.pdf", Some("final".to_string()));
    /// assert_eq!(renamed.remote_name_for(Path::new("/docs/report.pdf")), "final.pdf");
    /// ```
    pub fn remote_name_for(&self, upload_file: &Path) -> String {
        let file_name = upload_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (stem, extension) = split_extension(&file_name);

        match &self.display_name {
            Some(custom) => format!("{}{}", custom, extension),
            None => format!("{}{}", stem, extension),
        }
    }
}

/// ファイル名を (拡張子以外, `.` を含む拡張子) に分割する
///
/// 先頭のドットは拡張子とみなさない（`.bashrc` は拡張子なし）
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading_dots = file_name.len() - file_name.trim_start_matches('.').len();

    match file_name.rfind('.') {
        Some(index) if index >= leading_dots && index > 0 => file_name.split_at(index),
        _ => (file_name, ""),
    }
}
