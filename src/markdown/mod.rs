//! Markdown → HTML rendering.
//!
//! ```text
//! body ─▶ parse ─▶ Autolinks ─▶ HeadingAnchors ─▶ MathRenderer ─▶ CodeHighlighter ─▶ HTML
//! ```
//!
//! GFM tables, strikethrough and task lists are always on. Raw HTML passes
//! through unchanged. Rendering is CPU-bound and runs on tokio's blocking
//! pool; the renderer itself is a cheap `Arc` handle.

mod pipeline;
pub mod slug;
pub mod transform;


use std::sync::Arc;

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pipeline::{Pipeline, Transform};
pub use slug::AnchorStyle;
pub use transform::{HighlightConfig, render_math};

use transform::{Autolinks, CodeHighlighter, HeadingAnchors, MathRenderer, Themes};

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown highlight theme `{0}`")]
    UnknownTheme(String),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// `[markdown]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MarkdownConfig {
    /// `[^1]` footnotes.
    pub footnotes: bool,
    /// Link bare `https://` and `www.` URLs.
    pub autolinks: bool,
    /// `$…$` and `$$…$$` math.
    pub math: bool,
    /// Heading id style.
    pub anchors: AnchorStyle,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            footnotes: true,
            autolinks: true,
            math: true,
            anchors: AnchorStyle::default(),
        }
    }
}

impl MarkdownConfig {
    fn to_pulldown_options(self) -> Options {
        let mut opts = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
            | Options::ENABLE_HEADING_ATTRIBUTES;
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.math {
            opts.insert(Options::ENABLE_MATH);
        }
        opts
    }
}

/// Renders post bodies to HTML.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    options: MarkdownConfig,
    themes: Arc<Themes>,
}

impl MarkdownRenderer {
    /// Fails if either highlight theme is not bundled.
    pub fn new(options: MarkdownConfig, highlight: &HighlightConfig) -> Result<Self, RenderError> {
        let themes = Arc::new(Themes::load(highlight)?);
        Ok(Self {
            inner: Arc::new(Inner { options, themes }),
        })
    }

    /// Render `markdown` to an HTML fragment on the blocking pool.
    pub async fn render(&self, markdown: &str) -> Result<String, RenderError> {
        let inner = Arc::clone(&self.inner);
        let markdown = markdown.to_owned();
        let html = tokio::task::spawn_blocking(move || inner.render(&markdown)).await?;
        Ok(html)
    }

    /// Render on the current thread.
    pub fn render_blocking(&self, markdown: &str) -> String {
        self.inner.render(markdown)
    }
}

impl Inner {
    fn render(&self, markdown: &str) -> String {
        let options = self.options;
        Pipeline::parse(markdown, options.to_pulldown_options())
            .pipe_if(options.autolinks, Autolinks)
            .pipe(HeadingAnchors::new(options.anchors))
            .pipe_if(options.math, MathRenderer)
            .pipe(CodeHighlighter::new(Arc::clone(&self.themes)))
            .into_html(markdown.len() * 3 / 2)
    }
}
