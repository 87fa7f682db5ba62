//! Content pipeline for a bilingual (English/Chinese) Markdown blog.
//!
//! Posts are Markdown files with YAML (or TOML) front-matter stored as
//! `<root>/<locale>/<slug>.mdx`. Loading a post splits the front-matter,
//! renders the body to HTML and estimates the reading time for its locale.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use folio::{FolioConfig, Library, Locale};
//!
//! let config = FolioConfig::load("folio.toml".as_ref(), None)?;
//! let library = Library::from_config(&config)?;
//!
//! for post in library.get_blog_posts(Locale::Zh).await {
//!     println!("{} ({} min)", post.metadata.title, post.metadata.reading_time);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`reading`]: reading-time estimation
//! - [`markdown`]: Markdown → HTML (GFM, math, heading ids, code highlighting)
//! - [`content`]: front-matter, post discovery, [`Library`]
//! - [`config`]: `folio.toml`
//! - [`cli`]: the `folio` command

pub mod cli;
pub mod config;
pub mod content;
pub mod logger;
pub mod markdown;
pub mod reading;

/// Ordered string-keyed JSON object, as parsed from front-matter.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

pub use config::FolioConfig;
pub use content::{BlogPost, BlogPostMetadata, ContentError, Library, Locale};
pub use markdown::{MarkdownRenderer, RenderError};
pub use reading::{ReadingTime, estimate_reading_time};
