use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::config::FolioConfig;
use crate::markdown::{HighlightConfig, MarkdownConfig, MarkdownRenderer};
use crate::reading::ReadingTime;

fn library(root: &Path) -> Library {
    let renderer =
        MarkdownRenderer::new(MarkdownConfig::default(), &HighlightConfig::default()).unwrap();
    Library::new(PostLocator::new(root, "mdx"), ReadingTime::default(), renderer)
}

fn write_post(root: &Path, locale: &str, slug: &str, content: &str) {
    let dir = root.join(locale);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{slug}.mdx")), content).unwrap();
}

const HELLO: &str = "---\ntitle: Hello\ndate: 2024-05-01\nsummary: First post\n---\n# Hello\n\nSome *text* here.\n";

#[tokio::test]
async fn test_get_post() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);

    let post = library(dir.path())
        .get_post("hello", Locale::En)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(post.slug, "hello");
    assert_eq!(post.locale, Locale::En);
    assert_eq!(post.metadata.title, "Hello");
    assert_eq!(post.metadata.date, "2024-05-01");
    assert_eq!(post.metadata.summary, "First post");
    assert_eq!(post.metadata.reading_time, 1);
    assert!(post.source.contains("<h1 id=\"hello\">Hello</h1>"), "{}", post.source);
    assert!(post.source.contains("<em>text</em>"), "{}", post.source);
    assert!(!post.source.contains("title: Hello"), "{}", post.source);
}

#[tokio::test]
async fn test_missing_post_is_none() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);
    let library = library(dir.path());

    assert!(library.get_post("nope", Locale::En).await.unwrap().is_none());
    assert!(library.get_post("hello", Locale::Zh).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unsafe_slug_is_none() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);
    let library = library(dir.path());

    for slug in ["", "../en/hello", ".hello", "en/hello"] {
        assert!(
            library.get_post(slug, Locale::En).await.unwrap().is_none(),
            "{slug:?} should not resolve"
        );
    }
}

#[tokio::test]
async fn test_author_reading_time_wins() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "long", "---\ntitle: Long\nreadingTime: 99\n---\nshort body");

    let post = library(dir.path())
        .get_post("long", Locale::En)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.metadata.reading_time, 99);
}

#[tokio::test]
async fn test_reading_time_uses_locale() {
    let dir = TempDir::new().unwrap();
    let body = "字".repeat(351);
    write_post(dir.path(), "zh", "chars", &format!("---\ntitle: 中文\n---\n{body}"));
    write_post(dir.path(), "en", "chars", &body);
    let library = library(dir.path());

    let zh = library.get_post("chars", Locale::Zh).await.unwrap().unwrap();
    assert_eq!(zh.metadata.reading_time, 2);

    // One unbroken run is a single English word
    let en = library.get_post("chars", Locale::En).await.unwrap().unwrap();
    assert_eq!(en.metadata.reading_time, 1);
    assert_eq!(en.metadata.title, "");
}

#[tokio::test]
async fn test_reading_time_ignores_front_matter_and_code() {
    let dir = TempDir::new().unwrap();
    let words = vec!["word"; 300].join(" ");
    let content = format!("---\ntitle: T\nsummary: {words}\n---\nintro\n\n```\n{words}\n```\n");
    write_post(dir.path(), "en", "code", &content);

    let post = library(dir.path())
        .get_post("code", Locale::En)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.metadata.reading_time, 1);
}

#[tokio::test]
async fn test_extra_metadata_preserved() {
    let dir = TempDir::new().unwrap();
    write_post(
        dir.path(),
        "en",
        "tagged",
        "---\ntitle: T\ntags: [rust, blog]\ncover: /img/a.png\n---\nbody",
    );

    let post = library(dir.path())
        .get_post("tagged", Locale::En)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.metadata.extra.get("tags"), Some(&json!(["rust", "blog"])));
    assert_eq!(post.metadata.extra.get("cover"), Some(&json!("/img/a.png")));
}

#[tokio::test]
async fn test_malformed_front_matter_is_error() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "broken", "---\ntitle: [oops\n---\nbody");
    write_post(dir.path(), "en", "open", "---\ntitle: never closed\nbody");

    let library = library(dir.path());
    for slug in ["broken", "open"] {
        let err = library.get_post(slug, Locale::En).await.unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }), "{slug}: {err}");
    }
}

#[tokio::test]
async fn test_invalid_reading_time_is_error() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "bad", "---\nreadingTime: soon\n---\nbody");

    let err = library(dir.path())
        .get_post("bad", Locale::En)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ContentError::FrontMatter {
            source: FrontMatterError::InvalidField { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_get_blog_posts_skips_broken() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "zh", "one", "---\ntitle: 一\ndate: 2024-01-01\n---\n正文");
    write_post(dir.path(), "zh", "two", "---\ntitle: 二\ndate: 2024-02-01\n---\n正文");
    write_post(dir.path(), "zh", "bad", "---\ntitle: [broken\n---\n正文");

    let mut posts = library(dir.path()).get_blog_posts(Locale::Zh).await;
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.locale == Locale::Zh));

    BlogPost::sort_newest_first(&mut posts);
    let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, ["two", "one"]);
}

#[tokio::test]
async fn test_get_blog_posts_keeps_each_slug() {
    let dir = TempDir::new().unwrap();
    for i in 0..8 {
        let content = format!("---\ntitle: Post {i}\n---\nbody");
        write_post(dir.path(), "en", &format!("post-{i}"), &content);
    }

    let posts = library(dir.path()).get_blog_posts(Locale::En).await;
    assert_eq!(posts.len(), 8);
    for post in &posts {
        let n = post.slug.strip_prefix("post-").unwrap();
        assert_eq!(post.metadata.title, format!("Post {n}"));
    }
}

#[tokio::test]
async fn test_get_blog_posts_missing_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);

    let library = library(dir.path());
    assert!(library.get_blog_posts(Locale::Zh).await.is_empty());
    assert_eq!(library.get_blog_posts(Locale::En).await.len(), 1);
}

#[tokio::test]
async fn test_get_blog_posts_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);
    fs::write(dir.path().join("en/readme.txt"), "not a post").unwrap();
    fs::create_dir_all(dir.path().join("en/drafts.mdx")).unwrap();

    let posts = library(dir.path()).get_blog_posts(Locale::En).await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "hello");
}

#[tokio::test]
async fn test_available_locales() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "both", HELLO);
    write_post(dir.path(), "zh", "both", HELLO);
    write_post(dir.path(), "en", "only-en", HELLO);
    let library = library(dir.path());

    assert_eq!(
        library.available_locales("both", &["en", "zh", "fr"]).await,
        [Locale::En, Locale::Zh]
    );
    assert_eq!(
        library.available_locales("both", &["zh", "en"]).await,
        [Locale::Zh, Locale::En]
    );
    assert_eq!(
        library.available_locales("only-en", &["en", "zh"]).await,
        [Locale::En]
    );
    assert_eq!(
        library.available_locales("both", &["ZH", "zh"]).await,
        [Locale::Zh]
    );
    assert!(library.available_locales("missing", &["en", "zh"]).await.is_empty());
    assert!(library.available_locales("both", &[]).await.is_empty());
}

#[tokio::test]
async fn test_version_checks() {
    let dir = TempDir::new().unwrap();
    write_post(dir.path(), "en", "hello", HELLO);
    write_post(dir.path(), "zh", "ni-hao", HELLO);
    let library = library(dir.path());

    assert!(library.has_english_version("hello").await);
    assert!(!library.has_chinese_version("hello").await);
    assert!(library.has_chinese_version("ni-hao").await);
    assert!(!library.has_english_version("ni-hao").await);
}

#[tokio::test]
async fn test_from_config() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("posts");
    fs::create_dir_all(root.join("en")).unwrap();
    fs::write(root.join("en/hello.md"), HELLO).unwrap();

    let config: FolioConfig = format!(
        "[content]\nroot = {:?}\nextension = \"md\"\n[reading]\nwords-per-minute = 1\n",
        root.display().to_string()
    )
    .parse()
    .unwrap();

    let library = Library::from_config(&config).unwrap();
    assert_eq!(library.locator().root(), root);
    let post = library.get_post("hello", Locale::En).await.unwrap().unwrap();
    // "Hello Some text here." at one word per minute
    assert_eq!(post.metadata.reading_time, 4);
}
