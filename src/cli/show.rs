//! `folio show`

use std::io::Write;

use anyhow::{Result, bail};

use crate::content::{Library, Locale};

pub async fn run(library: &Library, slug: &str, locale: Locale, html: bool) -> Result<()> {
    let Some(post) = library.get_post(slug, locale).await? else {
        bail!("post `{slug}` not found for locale `{locale}`");
    };

    let mut out = std::io::stdout().lock();
    if html {
        out.write_all(post.source.as_bytes())?;
    } else {
        serde_json::to_writer_pretty(&mut out, &post)?;
        writeln!(out)?;
    }
    Ok(())
}
