//! # Archive Naming Service
//!
//! ディレクトリから決定的にアーカイブ名を導出する

use std::path::{Path, PathBuf};

/// アーカイブ名の接尾辞
pub const ARCHIVE_SUFFIX: &str = "(by_godrive).zip";

/// ディレクトリの隣に置くアーカイブのパス
///
/// 同じディレクトリに対しては常に同じパスを返すため、
/// 前回の実行で残ったアーカイブを再利用できる。
/// ファイル名を持たないパス（`/` や `..` など）は `None`。
/// 相対パス `.` などは呼び出し側で絶対パスにしてから渡すこと。
pub fn archive_path_for(directory: &Path) -> Option<PathBuf> {
    let name = directory.file_name()?;
    let parent = directory.parent().unwrap_or_else(|| Path::new(""));

    let mut archive_name = name.to_os_string();
    archive_name.push(ARCHIVE_SUFFIX);
    Some(parent.join(archive_name))
}
