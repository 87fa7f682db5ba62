//! Content loading error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::markdown::RenderError;

// ============================================================================
// FrontMatterError
// ============================================================================

/// Front-matter parsing errors
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front-matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("front-matter opened with `{delimiter}` is never closed")]
    Unterminated { delimiter: &'static str },

    #[error("front-matter must be a key/value mapping")]
    NotAMapping,

    #[error("front-matter field `{field}` {message}")]
    InvalidField { field: String, message: String },
}

// ============================================================================
// ContentError
// ============================================================================

/// Errors raised while loading posts
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed front-matter in `{}`", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("failed to render `{}`", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("unsupported locale `{0}`")]
    UnsupportedLocale(String),
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
