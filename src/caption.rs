//! Caption derivation from filenames.
//!
//! The filename is the caption: the stem with underscores turned into spaces,
//! followed by hashtags from the configured tag list.
//!
//! - `sunset_over_bay.jpg` + `nature,travel` → `sunset over bay #nature #travel`
//! - `plain.png` + no tags → `plain`
//! - `photo_1.jpg` → `photo 1`

use std::path::Path;

/// Split a comma-separated tag list into tags.
///
/// Whitespace around each tag is trimmed and empty entries are dropped, so
/// `"nature, travel,,"` yields `["nature", "travel"]`.
pub fn parse_tags(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Caption text without hashtags: file stem with `_` replaced by spaces.
pub fn display_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Full caption for `path`: display title plus ` #tag` for each tag, in order.
pub fn caption_for(path: &Path, tags: &[String]) -> String {
    let title = display_title(path);
    if tags.is_empty() {
        return title;
    }
    let hashtags: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    format!("{} {}", title, hashtags.join(" "))
}
