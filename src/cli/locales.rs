//! `folio locales`

use std::io::Write;

use anyhow::Result;

use crate::content::Library;

pub async fn run(library: &Library, slug: &str, codes: &[String]) -> Result<()> {
    let candidates: Vec<&str> = codes.iter().map(String::as_str).collect();
    let available = library.available_locales(slug, &candidates).await;

    let mut out = std::io::stdout().lock();
    for locale in available {
        writeln!(out, "{locale}")?;
    }
    Ok(())
}
