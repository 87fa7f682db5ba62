//! Post discovery under `<root>/<locale>/<slug>.<extension>`.

use std::io;
use std::path::{Path, PathBuf};

use super::{ContentError, Locale};
use crate::debug;

/// Maps (locale, slug) pairs to source files.
#[derive(Debug, Clone)]
pub struct PostLocator {
    root: PathBuf,
    extension: String,
}

impl PostLocator {
    /// `extension` is given without the leading dot.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the posts of `locale`.
    pub fn locale_dir(&self, locale: Locale) -> PathBuf {
        self.root.join(locale.code())
    }

    /// Source path for `slug`, or `None` if the slug cannot name a post file.
    pub fn post_path(&self, locale: Locale, slug: &str) -> Option<PathBuf> {
        is_safe_slug(slug).then(|| {
            self.locale_dir(locale)
                .join(format!("{slug}.{}", self.extension))
        })
    }

    /// Slugs of the post files directly inside the locale directory, in
    /// directory-listing order.
    pub async fn list_slugs(&self, locale: Locale) -> Result<Vec<String>, ContentError> {
        let dir = self.locale_dir(locale);
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| ContentError::io(&dir, e))?;

        let mut slugs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ContentError::io(&dir, e))?
        {
            let path = entry.path();
            if !is_file(&entry).await {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                debug!("content"; "skipping non-UTF-8 file name `{}`", path.display());
                continue;
            };
            if is_safe_slug(slug) {
                slugs.push(slug.to_string());
            }
        }

        Ok(slugs)
    }

    /// Whether a post file exists for `slug` in `locale`.
    pub async fn exists(&self, locale: Locale, slug: &str) -> bool {
        let Some(path) = self.post_path(locale, slug) else {
            return false;
        };
        tokio::fs::metadata(&path)
            .await
            .is_ok_and(|meta| meta.is_file())
    }
}

/// Follows symlinks, so a linked post file counts.
async fn is_file(entry: &tokio::fs::DirEntry) -> bool {
    match entry.file_type().await {
        Ok(kind) if kind.is_file() => true,
        Ok(kind) if kind.is_symlink() => tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|meta| meta.is_file()),
        _ => false,
    }
}

/// A slug must be a single, visible path component.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
}

/// `NotFound`, including a file removed after it was listed.
pub(crate) fn is_not_found(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
}
