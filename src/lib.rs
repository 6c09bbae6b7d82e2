//! # postfolder
//!
//! Posts one image from a watched folder to a social-media account, then
//! archives it. Run it from a scheduler: each invocation handles at most one
//! file and exits.
//!
//! # Pipeline
//!
//! ```text
//! 1. Select    folder/   →  one candidate       (newest or oldest by mtime)
//! 2. Convert   .png/.webp/.gif  →  .jpg          (skipped for .jpg/.jpeg)
//! 3. Archive   original  →  history/            (only when converted)
//! 4. Publish   .jpg + caption  →  service       (login, upload, logout)
//! 5. Archive   posted .jpg  →  history/
//! ```
//!
//! A failure stops the run where it happened. Files that were not archived
//! stay in the folder and are picked up again by the next run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`extension`] | Static table of selectable / postable extensions and rename offsets |
//! | [`select`] | Walks the folder (skipping `history/`) and picks one candidate |
//! | [`imaging`] | JPEG conversion behind the [`imaging::ImageBackend`] trait |
//! | [`archive`] | Moves processed files into `history/` without overwriting |
//! | [`caption`] | Caption from filename plus hashtags |
//! | [`publish`] | Scoped login/upload/logout against a [`publish::PublishingService`] |
//! | [`run`] | The [`run::Orchestrator`] sequencing all of the above |
//! | [`config`] | `postfolder.toml` loading and the explicit [`config::RunConfig`] |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | Terminal logger setup |
//!
//! # Design Decisions
//!
//! ## Selection Policy Is a Flag
//!
//! "Post the newest picture" and "work through the folder like a queue" are
//! both reasonable. Neither is inferred: the policy is an explicit setting
//! (`[selection] policy` or `--policy`).
//!
//! ## `history/` Is Excluded by Path Segment
//!
//! Only directories literally named `history` are skipped. A file called
//! `myhistory.jpg` is still a candidate.
//!
//! ## Archive Never Overwrites
//!
//! When `history/` already has a file with the same name, the new one gets a
//! numeric suffix (`photo-1.jpg`). Nothing posted is ever lost.
//!
//! ## No Locking, No Rollback
//!
//! Runs are sequential and unlocked. Overlapping runs on one folder are the
//! operator's responsibility to prevent.

pub mod archive;
pub mod caption;
pub mod config;
pub mod extension;
pub mod imaging;
pub mod logging;
pub mod output;
pub mod publish;
pub mod run;
pub mod select;

#[cfg(test)]
pub(crate) mod test_helpers;
