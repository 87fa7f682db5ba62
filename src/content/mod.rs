//! Blog content: locales, front-matter, post discovery and loading.
//!
//! Posts live at `<root>/<locale>/<slug>.<extension>`:
//!
//! ```text
//! content/blog/
//! ├── en/
//! │   └── hello-world.mdx
//! └── zh/
//!     └── hello-world.mdx
//! ```
//!
//! [`Library`] is the entry point. It resolves a (slug, locale) pair to a
//! file, splits off the front-matter, renders the body and estimates the
//! reading time.

mod error;
pub mod frontmatter;
mod library;
mod locale;
mod locator;
mod post;

#[cfg(test)]
mod tests;

pub use error::{ContentError, FrontMatterError};
pub use frontmatter::FrontMatter;
pub use library::Library;
pub use locale::{Locale, ReadingScript};
pub use locator::{PostLocator, is_safe_slug};
pub use post::{BlogPost, BlogPostMetadata};
