//! Configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error.rs     # ConfigError, ConfigDiagnostics
//! ├── section.rs   # [content] and section validation
//! ├── util.rs      # config file discovery, path normalization
//! └── mod.rs       # FolioConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[content]`   | Content root and post file extension             |
//! | `[reading]`   | Reading speeds for the reading-time estimate     |
//! | `[markdown]`  | Footnotes, autolinks, math, heading anchor style |
//! | `[highlight]` | Light/dark code themes and CSS prefix            |
//!
//! Every key is optional; a missing `folio.toml` means all defaults.

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use section::ContentConfig;
pub use util::{find_config_file, normalize_path};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::markdown::{HighlightConfig, MarkdownConfig};
use crate::reading::ReadingTime;
use crate::{debug, log};

/// Config file name looked up when none is given.
pub const DEFAULT_CONFIG_NAME: &str = "folio.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FolioConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths are resolved against (internal use only)
    #[serde(skip)]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub reading: ReadingTime,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl FromStr for FolioConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl FolioConfig {
    /// Load configuration for the CLI.
    ///
    /// Searches upward from the working directory for `config_name`. The
    /// config file's directory becomes the base for `content.root`.
    /// `root_override` (from `--root`) is resolved against the working
    /// directory instead.
    pub fn load(config_name: &Path, root_override: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(config_name, &cwd, root_override)
    }

    /// [`FolioConfig::load`] with the search starting at `start`.
    pub fn load_from(
        config_name: &Path,
        start: &Path,
        root_override: Option<&Path>,
    ) -> Result<Self> {
        let mut config = match find_config_file(config_name, start) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(normalize_path(&path));
                config
            }
            None if config_name == Path::new(DEFAULT_CONFIG_NAME) => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                Self {
                    base_dir: start.to_path_buf(),
                    ..Self::default()
                }
            }
            None => {
                return Err(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    config_name.display()
                ))
                .into());
            }
        };

        config.finalize(root_override);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Resolve the content root to an absolute path.
    fn finalize(&mut self, root_override: Option<&Path>) {
        self.content.root = match root_override {
            Some(root) => normalize_path(root),
            None => normalize_path(&self.base_dir.join(&self.content.root)),
        };
    }

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.content.validate(&mut diag);
        section::validate_reading(&self.reading, &mut diag);
        section::validate_highlight(&self.highlight, &mut diag);
        diag.into_result()
    }

    /// Absolute content root (after loading).
    pub fn content_root(&self) -> &Path {
        &self.content.root
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> FolioConfig {
    let (parsed, ignored) = FolioConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::AnchorStyle;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = FolioConfig::default();
        assert_eq!(config.content.root, PathBuf::from("content/blog"));
        assert_eq!(config.content.extension, "mdx");
        assert_eq!(config.reading.words_per_minute, 225);
        assert_eq!(config.reading.cjk_units_per_minute, 350);
        assert!(config.markdown.footnotes && config.markdown.autolinks && config.markdown.math);
        assert_eq!(config.markdown.anchors, AnchorStyle::Unicode);
        assert_eq!(config.highlight.light_theme, "InspiredGitHub");
        assert_eq!(config.highlight.dark_theme, "base16-ocean.dark");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.content, ContentConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = test_parse_config(
            r#"
[content]
root = "posts"
extension = "md"

[reading]
words-per-minute = 200
cjk-units-per-minute = 300

[markdown]
footnotes = false
autolinks = false
math = false
anchors = "ascii"

[highlight]
light-theme = "Solarized (light)"
dark-theme = "Solarized (dark)"
css-prefix = "blog"
"#,
        );
        assert_eq!(config.content.root, PathBuf::from("posts"));
        assert_eq!(config.content.extension, "md");
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.reading.cjk_units_per_minute, 300);
        assert!(!config.markdown.footnotes);
        assert!(!config.markdown.autolinks);
        assert!(!config.markdown.math);
        assert_eq!(config.markdown.anchors, AnchorStyle::Ascii);
        assert_eq!(config.highlight.css_prefix, "blog");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config = test_parse_config("[reading]\nwords-per-minute = 180");
        assert_eq!(config.reading.words_per_minute, 180);
        assert_eq!(config.reading.cjk_units_per_minute, 350);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = "[content\nroot = \"x\"".parse::<FolioConfig>();
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_invalid_anchor_style() {
        assert!("[markdown]\nanchors = \"emoji\"".parse::<FolioConfig>().is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[content]\nroot = \"x\"\nextention = \"md\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = FolioConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.content.root, PathBuf::from("x"));
        assert!(ignored.iter().any(|f| f.contains("extention")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = test_parse_config(
            "[content]\nextension = \".mdx\"\n[reading]\nwords-per-minute = 0\n",
        );
        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["content.extension", "reading.words-per-minute"]);
    }

    #[test]
    fn test_from_path_and_finalize() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.toml");
        fs::write(&path, "[content]\nroot = \"posts\"\n").unwrap();

        let mut config = FolioConfig::from_path(&path).unwrap();
        config.base_dir = dir.path().to_path_buf();
        config.finalize(None);
        assert!(config.content_root().is_absolute());
        assert!(config.content_root().ends_with("posts"));

        config.finalize(Some(Path::new("/srv/blog")));
        assert_eq!(config.content_root(), Path::new("/srv/blog"));
    }

    #[test]
    fn test_load_from_records_config_path() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("content/blog/en");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("folio.toml"), "[content]\nroot = \"posts\"\n").unwrap();

        let config = FolioConfig::load_from(Path::new("folio.toml"), &nested, None).unwrap();
        let config_path = config.config_path.as_deref().unwrap();
        assert!(config_path.ends_with("folio.toml"));
        assert!(config_path.is_absolute());
        assert!(config.content_root().ends_with("posts"));
    }

    #[test]
    fn test_load_from_without_file() {
        let dir = TempDir::new().unwrap();

        let config = FolioConfig::load_from(Path::new("folio.toml"), dir.path(), None).unwrap();
        assert!(config.config_path.is_none());
        assert!(config.content_root().ends_with("content/blog"));

        let err = FolioConfig::load_from(Path::new("other.toml"), dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
    }

    #[test]
    fn test_from_path_missing() {
        let err = FolioConfig::from_path(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
