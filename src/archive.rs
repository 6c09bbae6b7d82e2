//! Moving processed files into the history directory.
//!
//! The history directory (and any missing parents) is created on demand.
//! Files keep their base name, except on collision: an existing archived file
//! is never overwritten. The incoming file is stored under the first free
//! numbered name instead.
//!
//! ```text
//! history/
//! ├── photo_1.png          # first archived photo_1.png
//! ├── photo_1-1.png        # second one with the same name
//! └── photo_1-2.png        # third
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Cannot create history directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),
}

/// First path in `dir` named like `file_name` that does not exist yet.
fn free_destination(dir: &Path, file_name: &str) -> PathBuf {
    let direct = dir.join(file_name);
    if !direct.exists() {
        return direct;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };
    (1u32..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem}-{n}.{ext}")),
            None => dir.join(format!("{stem}-{n}")),
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(direct)
}

/// Move `file` into `history_dir`, returning where it ended up.
pub fn archive(file: &Path, history_dir: &Path) -> Result<PathBuf, ArchiveError> {
    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| ArchiveError::NoFileName(file.to_path_buf()))?;

    fs::create_dir_all(history_dir).map_err(|source| ArchiveError::CreateDir {
        path: history_dir.to_path_buf(),
        source,
    })?;

    let destination = free_destination(history_dir, &file_name);
    if destination.file_name() != file.file_name() {
        log::warn!(
            "{} already archived, storing as {}",
            file_name,
            destination.display()
        );
    }

    fs::rename(file, &destination).map_err(|source| ArchiveError::Move {
        from: file.to_path_buf(),
        to: destination.clone(),
        source,
    })?;
    log::info!("Archived {} → {}", file.display(), destination.display());
    Ok(destination)
}
