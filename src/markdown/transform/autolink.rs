//! Bare URL linking (GFM extended autolinks).
//!
//! `https://…`, `http://…` and `www.…` in plain text become links. Text that
//! is already inside a link (Markdown or a raw `<a>` tag), an image or a code
//! block is left alone. Trailing punctuation is not part of the URL, nor is an
//! unbalanced closing paren.

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use regex::Regex;

use crate::markdown::pipeline::Transform;

/// Scheme or `www.`, a dotted domain, then anything up to whitespace or `<`.
/// The URL must start the text or follow whitespace, `*`, `_`, `~` or `(`.
static BARE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s*_~(])((?:https?://|www\.)[\w-]+(?:\.[\w-]+)+[^\s<]*)")
        .expect("valid regex")
});

const TRAILING_PUNCTUATION: &[char] = &['?', '!', '.', ',', ':', ';', '*', '_', '~', '\'', '"'];

/// Turns bare URLs in text into links.
pub struct Autolinks;

impl<'a> Transform<'a> for Autolinks {
    fn transform(self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut link_depth = 0usize;
        let mut in_code = false;

        for event in events {
            match &event {
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
                Event::End(TagEnd::Link | TagEnd::Image) => link_depth = link_depth.saturating_sub(1),
                Event::InlineHtml(html) if is_anchor_open(html) => link_depth += 1,
                Event::InlineHtml(html) if is_anchor_close(html) => {
                    link_depth = link_depth.saturating_sub(1);
                }
                Event::Start(Tag::CodeBlock(_)) => in_code = true,
                Event::End(TagEnd::CodeBlock) => in_code = false,
                Event::Text(text) if link_depth == 0 && !in_code => {
                    if BARE_URL_RE.is_match(text) {
                        link_text(text, &mut out);
                        continue;
                    }
                }
                _ => {}
            }
            out.push(event);
        }

        out
    }
}

fn is_anchor_open(html: &str) -> bool {
    tag_named(html.as_bytes(), b"<a")
}

fn is_anchor_close(html: &str) -> bool {
    tag_named(html.as_bytes(), b"</a")
}

/// `html` starts with `prefix` (any case), followed by `>` or whitespace.
fn tag_named(html: &[u8], prefix: &[u8]) -> bool {
    html.len() > prefix.len()
        && html[..prefix.len()].eq_ignore_ascii_case(prefix)
        && (html[prefix.len()] == b'>' || html[prefix.len()].is_ascii_whitespace())
}

/// Push `text` split into plain runs and link events.
fn link_text<'a>(text: &str, out: &mut Vec<Event<'a>>) {
    let mut cursor = 0;

    for caps in BARE_URL_RE.captures_iter(text) {
        let Some(matched) = caps.get(1) else { continue };
        let url = trim_url(matched.as_str());
        if url.is_empty() {
            continue;
        }

        let start = matched.start();
        let end = start + url.len();
        if start > cursor {
            out.push(Event::Text(CowStr::from(text[cursor..start].to_string())));
        }

        let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{url}")
        } else {
            url.to_string()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(href),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));

        cursor = end;
    }

    if cursor < text.len() {
        out.push(Event::Text(CowStr::from(text[cursor..].to_string())));
    }
}

/// Strip trailing punctuation and unbalanced closing parens.
fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        if let Some(stripped) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = stripped;
        } else if url.ends_with(')') && url.matches('(').count() < url.matches(')').count() {
            url = &url[..url.len() - 1];
        } else {
            return url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::pipeline::Pipeline;
    use pulldown_cmark::Options;

    fn render(markdown: &str) -> String {
        Pipeline::parse(markdown, Options::empty())
            .pipe(Autolinks)
            .into_html(0)
    }

    #[test]
    fn test_links_bare_urls() {
        assert_eq!(
            render("see https://example.com/docs for more"),
            "<p>see <a href=\"https://example.com/docs\">https://example.com/docs</a> for more</p>\n"
        );
    }

    #[test]
    fn test_www_gets_scheme() {
        assert_eq!(
            render("www.rust-lang.org"),
            "<p><a href=\"http://www.rust-lang.org\">www.rust-lang.org</a></p>\n"
        );
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        let html = render("Visit https://example.com.");
        assert!(html.contains(">https://example.com</a>."), "{html}");

        let html = render("see https://example.com/path; then");
        assert!(html.contains(">https://example.com/path</a>;"), "{html}");

        let html = render("(see https://example.com/a_(b))");
        assert!(html.contains("href=\"https://example.com/a_(b)\""), "{html}");
        assert!(html.contains("</a>)"), "{html}");
    }

    #[test]
    fn test_multiple_urls() {
        let html = render("https://a.dev and https://b.dev");
        assert_eq!(html.matches("<a href=").count(), 2);
    }

    #[test]
    fn test_existing_links_untouched() {
        let html = render("[https://example.com](https://example.com)");
        assert_eq!(html.matches("<a href=").count(), 1);

        let html = render("<https://example.com>");
        assert_eq!(html.matches("<a href=").count(), 1);

        let html = render("<a href=\"/x\">https://example.com</a> and https://b.dev");
        assert_eq!(html.matches("<a href=").count(), 2, "{html}");

        assert!(tag_named(b"<A HREF='x'>", b"<a"));
        assert!(!tag_named(b"<abbr>", b"<a"));
        assert!(!tag_named(b"</abbr>", b"</a"));
    }

    #[test]
    fn test_code_untouched() {
        let html = render("`https://example.com`");
        assert!(!html.contains("<a "), "{html}");

        let html = render("```\nhttps://example.com\n```");
        assert!(!html.contains("<a "), "{html}");
    }

    #[test]
    fn test_requires_boundary_and_dotted_domain() {
        assert!(!render("xhttps://example.com").contains("<a "));
        assert!(!render("https://localhost").contains("<a "));
    }
}
