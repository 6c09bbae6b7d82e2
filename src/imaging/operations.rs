//! High-level conversion: naming the output and driving the backend.

use super::backend::{BackendError, ImageBackend};
use super::params::{ConvertParams, Quality};
use crate::extension::{ExtensionRule, POSTABLE_EXTENSION};
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, BackendError>;

/// Path of the JPEG produced from `source`.
///
/// The last `rule.rename_suffix_len` characters of the filename are dropped and
/// `.jpg` appended; the file stays in the source's directory.
/// `harbour.webp` → `harbour.jpg`, `Photo.PNG` → `Photo.jpg`.
pub fn converted_path(source: &Path, rule: &ExtensionRule) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let cut = name.len().saturating_sub(rule.rename_suffix_len);
    let base = name.get(..cut).unwrap_or(&name);
    source.with_file_name(format!("{base}{POSTABLE_EXTENSION}"))
}

/// Convert `source` into its postable JPEG and return the new path.
pub fn convert_to_postable(
    backend: &impl ImageBackend,
    source: &Path,
    rule: &ExtensionRule,
    quality: Quality,
) -> Result<PathBuf> {
    let output = converted_path(source, rule);
    log::info!("Converting {} → {}", source.display(), output.display());
    backend.convert(&ConvertParams {
        source: source.to_path_buf(),
        output: output.clone(),
        quality,
    })?;
    Ok(output)
}
