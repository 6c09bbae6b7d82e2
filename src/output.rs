//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects. Paths are shown relative to the watched
//! folder when possible.
//!
//! ## Check
//!
//! ```text
//! Next post (newest first)
//!     Source: trips/harbour.webp
//!     Convert: trips/harbour.jpg
//!     Caption: harbour #sea
//! ```
//!
//! ## Run
//!
//! ```text
//! Posted harbour #sea
//!     Post: 3141592
//!     Uploaded: trips/harbour.jpg
//!     Archived: history/harbour.webp
//!     Archived: history/harbour.jpg
//! ```

use crate::caption;
use crate::extension;
use crate::imaging::converted_path;
use crate::run::RunOutcome;
use crate::select::{Candidate, SelectionPolicy};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Describe which file the next run would post, without touching anything.
pub fn format_check_output(
    candidate: Option<&Candidate>,
    policy: SelectionPolicy,
    tags: &[String],
    root: &Path,
) -> Vec<String> {
    let Some(candidate) = candidate else {
        return vec!["No files found this iteration".to_string()];
    };

    let mut lines = vec![format!("Next post ({policy})")];
    lines.push(format!(
        "{}Source: {}",
        indent(1),
        relative(&candidate.path, root)
    ));

    let rule = extension::rule_for_path(&candidate.path);
    let posted = if rule.requires_conversion() {
        let out = converted_path(&candidate.path, &rule);
        lines.push(format!("{}Convert: {}", indent(1), relative(&out, root)));
        out
    } else {
        candidate.path.clone()
    };
    lines.push(format!(
        "{}Caption: {}",
        indent(1),
        caption::caption_for(&posted, tags)
    ));
    lines
}

pub fn print_check_output(
    candidate: Option<&Candidate>,
    policy: SelectionPolicy,
    tags: &[String],
    root: &Path,
) {
    for line in format_check_output(candidate, policy, tags, root) {
        println!("{}", line);
    }
}

/// Summarize what a run did.
pub fn format_run_output(outcome: &RunOutcome, root: &Path) -> Vec<String> {
    match outcome {
        RunOutcome::NoCandidate => vec!["No files found this iteration".to_string()],
        RunOutcome::Posted(report) => {
            let mut lines = vec![format!("Posted {}", report.caption)];
            lines.push(format!("{}Post: {}", indent(1), report.post_id));
            lines.push(format!(
                "{}Uploaded: {}",
                indent(1),
                relative(&report.posted, root)
            ));
            if let Some(original) = &report.archived_original {
                lines.push(format!(
                    "{}Archived: {}",
                    indent(1),
                    relative(original, root)
                ));
            }
            lines.push(format!(
                "{}Archived: {}",
                indent(1),
                relative(&report.archived_final, root)
            ));
            lines
        }
    }
}

pub fn print_run_output(outcome: &RunOutcome, root: &Path) {
    for line in format_run_output(outcome, root) {
        println!("{}", line);
    }
}
