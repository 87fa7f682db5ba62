//! Event-stream transforms.
//!
//! - `autolink`: bare URLs → links
//! - `anchor`: unique heading ids
//! - `math`: `$…$` / `$$…$$` → MathML
//! - `highlight`: fenced code → dual-theme token spans

mod anchor;
mod autolink;
pub mod highlight;
mod math;

pub use anchor::HeadingAnchors;
pub use autolink::Autolinks;
pub use highlight::{CodeHighlighter, HighlightConfig, Themes};
pub use math::{MathRenderer, render_math};
