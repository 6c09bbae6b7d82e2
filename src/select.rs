//! Candidate selection.
//!
//! Walks the watched folder, skips the archive, keeps files whose extension is
//! selectable and returns the single file the [`SelectionPolicy`] prefers.
//!
//! ```text
//! photos/
//! ├── 2024_dawn.jpg        # candidate
//! ├── harbour.webp         # candidate (converted before posting)
//! ├── notes.txt            # ignored: not selectable
//! ├── trips/
//! │   └── alps.png         # candidate (traversal is recursive)
//! └── history/             # pruned: never selected
//!     └── old.jpg
//! ```
//!
//! ## Exclusion
//!
//! A directory is pruned when one of its path segments is exactly `history`
//! (case-sensitive). Files whose name merely contains the word, such as
//! `myhistory.jpg`, remain candidates.
//!
//! ## Symlinks
//!
//! Links are not followed. A symlinked image or directory is skipped (logged
//! at debug level), so a post never moves a file that lives outside the
//! watched folder.
//!
//! ## Ties
//!
//! When two files share the exact same modification time, the first one
//! encountered wins. Traversal order depends on the filesystem, so the outcome
//! under ties is not deterministic.

use crate::extension;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

/// Name of the archive directory inside the watched folder.
pub const HISTORY_DIR: &str = "history";

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Cannot traverse {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Cannot read modification time of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which end of the modification-time ordering wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Latest modification time first.
    #[default]
    Newest,
    /// Earliest modification time first: the folder behaves like a FIFO queue.
    Oldest,
}

impl SelectionPolicy {
    /// Whether `challenger` should replace the current `best` pick.
    ///
    /// Strict comparison keeps the first encountered file on ties.
    fn prefers(self, challenger: SystemTime, best: SystemTime) -> bool {
        match self {
            SelectionPolicy::Newest => challenger > best,
            SelectionPolicy::Oldest => challenger < best,
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::Newest => write!(f, "newest first"),
            SelectionPolicy::Oldest => write!(f, "oldest first"),
        }
    }
}

/// A file picked for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub name: String,
    pub modified_at: SystemTime,
}

fn is_history(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == HISTORY_DIR
}

/// Pick the candidate file under `root`, or `None` when nothing is selectable.
pub fn select(root: &Path, policy: SelectionPolicy) -> Result<Option<Candidate>, SelectError> {
    let mut best: Option<Candidate> = None;

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_history(e));

    for entry in walker {
        let entry = entry.map_err(|source| SelectError::Traversal {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        if entry.path_is_symlink() {
            log::debug!("Selector: skipping symlink {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        if !extension::rule_for_path(entry.path()).selectable {
            continue;
        }

        let modified_at = entry
            .metadata()
            .map_err(std::io::Error::from)
            .and_then(|m| m.modified())
            .map_err(|source| SelectError::Metadata {
                path: entry.path().to_path_buf(),
                source,
            })?;

        let replace = match &best {
            None => true,
            Some(current) => policy.prefers(modified_at, current.modified_at),
        };
        if replace {
            log::debug!("Selector: {} is the current pick", entry.path().display());
            best = Some(Candidate {
                path: entry.path().to_path_buf(),
                name: entry.file_name().to_string_lossy().to_string(),
                modified_at,
            });
        }
    }

    Ok(best)
}
