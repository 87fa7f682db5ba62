//! `[content]` section and per-section validation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigDiagnostics;
use crate::markdown::HighlightConfig;
use crate::markdown::transform::highlight::theme_names;
use crate::reading::ReadingTime;

/// `[content]` section.
///
/// # Example
///
/// ```toml
/// [content]
/// root = "content/blog"   # relative to folio.toml
/// extension = "mdx"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContentConfig {
    /// Directory holding one sub-directory per locale.
    pub root: PathBuf,
    /// Post file extension, without the dot.
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: "content/blog".into(),
            extension: "mdx".into(),
        }
    }
}

impl ContentConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extension.is_empty() {
            diag.error("content.extension", "must not be empty");
        } else if self.extension.contains(['.', '/', '\\']) {
            diag.error_with_hint(
                "content.extension",
                format!("`{}` is not a bare extension", self.extension),
                "write it without the leading dot, e.g. `mdx`",
            );
        }
        if self.root.as_os_str().is_empty() {
            diag.error("content.root", "must not be empty");
        }
    }
}

pub(super) fn validate_reading(reading: &ReadingTime, diag: &mut ConfigDiagnostics) {
    if reading.words_per_minute == 0 {
        diag.error("reading.words-per-minute", "must be greater than 0");
    }
    if reading.cjk_units_per_minute == 0 {
        diag.error("reading.cjk-units-per-minute", "must be greater than 0");
    }
}

pub(super) fn validate_highlight(highlight: &HighlightConfig, diag: &mut ConfigDiagnostics) {
    let names = theme_names();
    let hint = || format!("available themes: {}", names.join(", "));
    if !names.contains(&highlight.light_theme.as_str()) {
        diag.error_with_hint(
            "highlight.light-theme",
            format!("unknown theme `{}`", highlight.light_theme),
            hint(),
        );
    }
    if !names.contains(&highlight.dark_theme.as_str()) {
        diag.error_with_hint(
            "highlight.dark-theme",
            format!("unknown theme `{}`", highlight.dark_theme),
            hint(),
        );
    }
    if highlight.css_prefix.is_empty()
        || !highlight
            .css_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        diag.error(
            "highlight.css-prefix",
            "must be a non-empty CSS identifier (letters, digits, `-`, `_`)",
        );
    }
}
