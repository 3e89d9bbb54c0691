//! Zip Archiver Implementation
//!
//! Archiverのzip実装

use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::errors::ArchiveError;
use crate::domain::repositories::archiver::{ArchiveOutcome, Archiver};
use crate::domain::services::archive_naming::archive_path_for;

/// エントリの中身を開く関数
type EntryOpener = dyn Fn(&Path) -> io::Result<Box<dyn Read>>;

/// Deflate-compressed zip archives written next to the source directory
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }

    /// アーカイブを用意する（同期処理）
    fn ensure_archive_sync(directory: &Path) -> Result<ArchiveOutcome, ArchiveError> {
        Self::ensure_archive_with(directory, &open_entry)
    }

    fn ensure_archive_with(
        directory: &Path,
        open: &EntryOpener,
    ) -> Result<ArchiveOutcome, ArchiveError> {
        let source = fs::canonicalize(directory)
            .map_err(|e| ArchiveError::from_io(directory.to_path_buf(), e))?;
        if !source.is_dir() {
            return Err(ArchiveError::InvalidSource(directory.to_path_buf()));
        }

        let archive = archive_path_for(&source)
            .ok_or_else(|| ArchiveError::InvalidSource(directory.to_path_buf()))?;

        if archive.exists() {
            info!("Reusing existing archive {}", archive.display());
            return Ok(ArchiveOutcome {
                path: archive,
                reused: true,
            });
        }

        match Self::write_archive(&source, &archive, open) {
            Ok(count) => {
                info!("Archived {} files into {}", count, archive.display());
                Ok(ArchiveOutcome {
                    path: archive,
                    reused: false,
                })
            }
            Err(e) => {
                // 中途半端なアーカイブを残すと次回再利用されてしまう
                if let Err(remove_err) = fs::remove_file(&archive) {
                    if remove_err.kind() != io::ErrorKind::NotFound {
                        warn!(
                            "Failed to remove partial archive {}: {}",
                            archive.display(),
                            remove_err
                        );
                    }
                }
                Err(ArchiveError::from_io(archive, e))
            }
        }
    }

    /// ディレクトリ配下の通常ファイルを書き込み、件数を返す
    ///
    /// ファイルへのシンボリックリンクはリンク先の内容で格納し、
    /// ディレクトリへのリンクは辿らない
    fn write_archive(source: &Path, archive: &Path, open: &EntryOpener) -> io::Result<usize> {
        let file = File::create(archive)?;
        let mut writer = ZipWriter::new(BufWriter::new(file));
        let mut count = 0;

        for entry in WalkDir::new(source).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if entry.path() == archive {
                continue;
            }

            let size = if entry.file_type().is_file() {
                entry.metadata().map_err(io::Error::from)?.len()
            } else if entry.path_is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => target.len(),
                    Ok(_) => {
                        debug!("Not entering symlinked directory {}", entry.path().display());
                        continue;
                    }
                    Err(e) => {
                        warn!("Skipping broken symlink {}: {}", entry.path().display(), e);
                        continue;
                    }
                }
            } else {
                continue;
            };

            let name = entry_name(source, entry.path())?;
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .large_file(size >= u32::MAX as u64);

            debug!("Adding {}", name);
            writer.start_file(name, options).map_err(zip_to_io)?;
            let mut input = open(entry.path())?;
            io::copy(&mut input, &mut writer)?;
            count += 1;
        }

        let mut inner = writer.finish().map_err(zip_to_io)?;
        io::Write::flush(&mut inner)?;
        inner.get_ref().sync_all()?;
        Ok(count)
    }
}

fn open_entry(path: &Path) -> io::Result<Box<dyn Read>> {
    Ok(Box::new(File::open(path)?))
}

/// Entry name relative to the archived directory, always `/`-separated
fn entry_name(source: &Path, path: &Path) -> io::Result<String> {
    let relative = path
        .strip_prefix(source)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn zip_to_io(err: zip::result::ZipError) -> io::Error {
    match err {
        zip::result::ZipError::Io(e) => e,
        other => io::Error::other(other),
    }
}

#[async_trait]
impl Archiver for ZipArchiver {
    async fn ensure_archive(&self, directory: &Path) -> Result<ArchiveOutcome, ArchiveError> {
        let directory: PathBuf = directory.to_path_buf();
        let fallback = directory.clone();

        tokio::task::spawn_blocking(move || Self::ensure_archive_sync(&directory))
            .await
            .map_err(|e| ArchiveError::from_io(fallback, io::Error::other(e)))?
    }
}
