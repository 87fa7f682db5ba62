//! `folio` command-line tool.
//!
//! - `list`: posts of a locale, newest first
//! - `show`: one post as JSON or HTML
//! - `locales`: which locales a slug exists in
//! - `estimate`: reading time of an arbitrary Markdown file

mod args;
mod estimate;
mod list;
mod locales;
mod show;

pub use args::{Cli, Commands};

use anyhow::Result;

use crate::content::Library;

/// Run the parsed command against `library`.
pub async fn run(command: &Commands, library: &Library) -> Result<()> {
    match command {
        Commands::List { locale, json } => list::run(library, *locale, *json).await,
        Commands::Show { slug, locale, html } => show::run(library, slug, *locale, *html).await,
        Commands::Locales { slug, codes } => locales::run(library, slug, codes).await,
        Commands::Estimate { input, locale } => estimate::run(library, input, *locale).await,
    }
}

/// `1 post`, `3 posts`.
fn plural_count(count: usize, noun: &str) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{s}")
}
