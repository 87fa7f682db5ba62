//! Post loading: single posts, whole locales, and locale availability.

use std::path::Path;

use super::frontmatter;
use super::locator::{PostLocator, is_not_found};
use super::{BlogPost, BlogPostMetadata, ContentError, Locale};
use crate::config::FolioConfig;
use crate::markdown::{MarkdownRenderer, RenderError};
use crate::reading::ReadingTime;
use crate::{debug, log};

/// Entry point for reading posts from a content root.
///
/// Cloning is cheap; the renderer is shared.
#[derive(Debug, Clone)]
pub struct Library {
    locator: PostLocator,
    reading: ReadingTime,
    renderer: MarkdownRenderer,
}

impl Library {
    pub fn new(locator: PostLocator, reading: ReadingTime, renderer: MarkdownRenderer) -> Self {
        Self {
            locator,
            reading,
            renderer,
        }
    }

    /// Build from a loaded configuration.
    pub fn from_config(config: &FolioConfig) -> Result<Self, RenderError> {
        let renderer = MarkdownRenderer::new(config.markdown, &config.highlight)?;
        let locator = PostLocator::new(config.content_root(), config.content.extension.clone());
        Ok(Self::new(locator, config.reading, renderer))
    }

    pub fn locator(&self) -> &PostLocator {
        &self.locator
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    pub fn reading(&self) -> &ReadingTime {
        &self.reading
    }

    /// Load one post.
    ///
    /// A slug with no source file (or one that cannot name a file) is
    /// `Ok(None)`. Malformed front-matter and render failures are errors.
    pub async fn get_post(
        &self,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<BlogPost>, ContentError> {
        let Some(path) = self.locator.post_path(locale, slug) else {
            debug!("content"; "rejecting slug `{}`", slug.escape_debug());
            return Ok(None);
        };
        if !self.locator.exists(locale, slug).await {
            return Ok(None);
        }

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if is_not_found(&e) => {
                debug!("content"; "`{}` vanished before it could be read", path.display());
                return Ok(None);
            }
            Err(e) => return Err(ContentError::io(&path, e)),
        };

        self.build_post(&path, &raw, slug, locale).await.map(Some)
    }

    async fn build_post(
        &self,
        path: &Path,
        raw: &str,
        slug: &str,
        locale: Locale,
    ) -> Result<BlogPost, ContentError> {
        let front_matter_error = |source| ContentError::FrontMatter {
            path: path.to_path_buf(),
            source,
        };

        let split = frontmatter::split(raw).map_err(front_matter_error)?;
        let source = self
            .renderer
            .render(split.body)
            .await
            .map_err(|source| ContentError::Render {
                path: path.to_path_buf(),
                source,
            })?;
        let reading_time = self.reading.estimate(split.body, locale);
        let metadata =
            BlogPostMetadata::assemble(split.metadata, reading_time).map_err(front_matter_error)?;

        Ok(BlogPost {
            metadata,
            slug: slug.to_string(),
            source,
            locale,
        })
    }

    /// Load every post of `locale`, in directory-listing order.
    ///
    /// Never fails: a post that cannot be loaded is logged and skipped, and
    /// an unreadable locale directory gives an empty list.
    pub async fn get_blog_posts(&self, locale: Locale) -> Vec<BlogPost> {
        let slugs = match self.locator.list_slugs(locale).await {
            Ok(slugs) => slugs,
            Err(e) => {
                log!("warning"; "cannot list {} posts: {:#}", locale, anyhow::Error::from(e));
                return Vec::new();
            }
        };

        let tasks: Vec<_> = slugs
            .into_iter()
            .map(|slug| {
                let library = self.clone();
                let task = {
                    let slug = slug.clone();
                    tokio::spawn(async move { library.get_post(&slug, locale).await })
                };
                (slug, task)
            })
            .collect();

        let mut posts = Vec::with_capacity(tasks.len());
        for (slug, task) in tasks {
            match task.await {
                Ok(Ok(Some(post))) => posts.push(post),
                Ok(Ok(None)) => {
                    debug!("content"; "`{}` ({}) disappeared after listing", slug, locale);
                }
                Ok(Err(e)) => {
                    log!("warning"; "skipping `{}` ({}): {:#}", slug, locale, anyhow::Error::from(e));
                }
                Err(e) => {
                    log!("warning"; "skipping `{}` ({}): load task failed: {}", slug, locale, e);
                }
            }
        }

        debug!("content"; "loaded {} {} posts", posts.len(), locale);
        posts
    }

    /// The locales among `candidates` that have a file for `slug`, in input
    /// order. Unsupported codes and repeats are skipped.
    pub async fn available_locales(&self, slug: &str, candidates: &[&str]) -> Vec<Locale> {
        let mut available = Vec::new();
        for code in candidates {
            let locale = match code.parse::<Locale>() {
                Ok(locale) => locale,
                Err(e) => {
                    debug!("locale"; "{}", e);
                    continue;
                }
            };
            if !available.contains(&locale) && self.locator.exists(locale, slug).await {
                available.push(locale);
            }
        }
        available
    }

    pub async fn has_chinese_version(&self, slug: &str) -> bool {
        self.locator.exists(Locale::Zh, slug).await
    }

    pub async fn has_english_version(&self, slug: &str) -> bool {
        self.locator.exists(Locale::En, slug).await
    }
}
