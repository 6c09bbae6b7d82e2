//! One invocation: select, convert if needed, post, archive.
//!
//! ```text
//! Scanning ──none──▶ NoCandidate
//!    │
//!    ├─ needs conversion ─▶ Converting ─▶ ArchivingOriginal ─┐
//!    │                                                       ▼
//!    └─ postable ─────────────────────────────────────▶ Publishing ─▶ ArchivingFinal ─▶ Done
//! ```
//!
//! Any failure ends the run at the failing stage. Nothing is rolled back: the
//! filesystem stays as the last successful stage left it. A file that failed
//! to convert or upload is still in the watched folder, so the next scheduled
//! run picks it up again.
//!
//! Runs are not locked against each other. Two concurrent runs on the same
//! folder may pick the same file; schedule them so they never overlap.

use crate::archive::{self, ArchiveError};
use crate::caption;
use crate::config::RunConfig;
use crate::extension;
use crate::imaging::{BackendError, ImageBackend, convert_to_postable};
use crate::publish::{self, PostId, PublishError, PublishingService};
use crate::select::{self, SelectError};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Scanning failed: {0}")]
    Select(#[from] SelectError),
    #[error("Conversion failed: {0}")]
    Convert(#[from] BackendError),
    #[error("Archiving failed while {stage}: {source}")]
    Archive {
        stage: Stage,
        #[source]
        source: ArchiveError,
    },
    #[error("Publishing failed: {0}")]
    Publish(#[from] PublishError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scanning,
    Converting,
    ArchivingOriginal,
    Publishing,
    ArchivingFinal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scanning => "scanning",
            Stage::Converting => "converting",
            Stage::ArchivingOriginal => "archiving original",
            Stage::Publishing => "publishing",
            Stage::ArchivingFinal => "archiving posted file",
        };
        f.write_str(name)
    }
}

/// What a successful post did to the filesystem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostReport {
    /// The selected file.
    pub source: PathBuf,
    /// The file that was uploaded (the source itself, or its JPEG conversion).
    pub posted: PathBuf,
    pub caption: String,
    pub post_id: PostId,
    /// Where the source went when it had to be converted first.
    pub archived_original: Option<PathBuf>,
    pub archived_final: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunOutcome {
    NoCandidate,
    Posted(PostReport),
}

/// Sequences the pipeline for one folder.
pub struct Orchestrator<B: ImageBackend, S: PublishingService> {
    config: RunConfig,
    backend: B,
    service: S,
}

impl<B: ImageBackend, S: PublishingService> Orchestrator<B, S> {
    pub fn new(config: RunConfig, backend: B, service: S) -> Self {
        Self {
            config,
            backend,
            service,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn enter(&self, stage: Stage) {
        log::debug!("Stage: {stage}");
    }

    fn archive(&self, stage: Stage, file: &Path) -> Result<PathBuf, RunError> {
        self.enter(stage);
        archive::archive(file, &self.config.history_dir())
            .map_err(|source| RunError::Archive { stage, source })
    }

    /// Process at most one file. "Nothing to post" is `Ok(NoCandidate)`.
    pub fn run(&self) -> Result<RunOutcome, RunError> {
        self.enter(Stage::Scanning);
        let Some(candidate) = select::select(&self.config.root, self.config.policy)? else {
            return Ok(RunOutcome::NoCandidate);
        };
        log::info!(
            "Selected {} ({})",
            candidate.path.display(),
            self.config.policy
        );

        let rule = extension::rule_for_path(&candidate.path);
        let (posted, archived_original) = if rule.requires_conversion() {
            self.enter(Stage::Converting);
            let converted = convert_to_postable(
                &self.backend,
                &candidate.path,
                &rule,
                self.config.quality,
            )?;

            let archived = self.archive(Stage::ArchivingOriginal, &candidate.path)?;
            (converted, Some(archived))
        } else {
            (candidate.path.clone(), None)
        };

        self.enter(Stage::Publishing);
        let caption = caption::caption_for(&posted, &self.config.tags);
        let post_id = publish::publish(&self.service, &self.config.credentials, &posted, &caption)?;

        let archived_final = self.archive(Stage::ArchivingFinal, &posted)?;

        Ok(RunOutcome::Posted(PostReport {
            source: candidate.path,
            posted,
            caption,
            post_id,
            archived_original,
            archived_final,
        }))
    }
}
