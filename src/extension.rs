//! Static extension table deciding which files are candidates and which need
//! conversion before they can be posted.
//!
//! | Extension | Selectable | Postable | Rename offset |
//! |---|---|---|---|
//! | `.jpg` | yes | yes | 0 |
//! | `.jpeg` | yes | yes | 0 |
//! | `.png` | yes | no | 4 |
//! | `.gif` | yes | no | 4 |
//! | `.webp` | yes | no | 5 |
//!
//! The rename offset is the number of trailing characters (dot included) removed
//! from a filename before `.jpg` is appended to name the converted file.

use std::path::Path;

/// Extension appended to converted files.
pub const POSTABLE_EXTENSION: &str = ".jpg";

/// How one file extension is treated by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRule {
    pub extension: &'static str,
    pub selectable: bool,
    pub postable: bool,
    /// Characters to strip from the filename when converting; 0 when postable.
    pub rename_suffix_len: usize,
}

impl ExtensionRule {
    const fn postable(extension: &'static str) -> Self {
        Self {
            extension,
            selectable: true,
            postable: true,
            rename_suffix_len: 0,
        }
    }

    const fn needs_conversion(extension: &'static str) -> Self {
        Self {
            extension,
            selectable: true,
            postable: false,
            rename_suffix_len: extension.len(),
        }
    }

    const UNKNOWN: Self = Self {
        extension: "",
        selectable: false,
        postable: false,
        rename_suffix_len: 0,
    };

    pub fn requires_conversion(&self) -> bool {
        self.selectable && !self.postable
    }
}

const RULES: &[ExtensionRule] = &[
    ExtensionRule::postable(".jpg"),
    ExtensionRule::postable(".jpeg"),
    ExtensionRule::needs_conversion(".png"),
    ExtensionRule::needs_conversion(".gif"),
    ExtensionRule::needs_conversion(".webp"),
];

/// Look up the rule for a lowercase extension including its leading dot.
///
/// Unknown extensions yield a rule that is not selectable.
pub fn rule_for(extension: &str) -> ExtensionRule {
    RULES
        .iter()
        .find(|r| r.extension == extension)
        .copied()
        .unwrap_or(ExtensionRule::UNKNOWN)
}

/// Look up the rule for a path, matching its extension case-insensitively.
pub fn rule_for_path(path: &Path) -> ExtensionRule {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => rule_for(&format!(".{}", ext.to_ascii_lowercase())),
        None => ExtensionRule::UNKNOWN,
    }
}
