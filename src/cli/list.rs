//! `folio list`

use std::io::Write;

use anyhow::Result;

use super::plural_count;
use crate::content::{BlogPost, Library, Locale};
use crate::log;

pub async fn run(library: &Library, locale: Locale, json: bool) -> Result<()> {
    let mut posts = library.get_blog_posts(locale).await;
    BlogPost::sort_newest_first(&mut posts);
    log!("content"; "found {} in `{}`", plural_count(posts.len(), "post"), locale);

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &posts)?;
        writeln!(out)?;
    } else {
        for post in &posts {
            writeln!(out, "{}", summary_line(post))?;
        }
    }
    Ok(())
}

/// `date  slug  title  (N min)`; a missing date keeps the columns aligned.
fn summary_line(post: &BlogPost) -> String {
    let meta = &post.metadata;
    format!(
        "{:<10}  {}  {}  ({} min)",
        meta.date, post.slug, meta.title, meta.reading_time
    )
}
