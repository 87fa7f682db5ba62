//! `folio estimate`

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::content::{Library, Locale, frontmatter};

pub async fn run(library: &Library, input: &Path, locale: Locale) -> Result<()> {
    let raw = read_input(input).await?;
    let split = frontmatter::split(&raw)
        .with_context(|| format!("malformed front-matter in `{}`", input.display()))?;
    let minutes = library.reading().estimate(split.body, locale);
    println!("{minutes}");
    Ok(())
}

/// Read a file, or stdin for `-`.
async fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .context("Failed to read stdin")?;
        Ok(raw)
    } else {
        tokio::fs::read_to_string(input)
            .await
            .with_context(|| format!("Failed to read `{}`", input.display()))
    }
}
