//! Heading anchor slugs.

use deunicode::deunicode;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Anchor generation style for heading ids.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStyle {
    /// GitHub style: lowercase, keep letters and digits of any script (default).
    #[default]
    Unicode,
    /// Transliterate Unicode → ASCII, collapse separators.
    Ascii,
}

/// Id used when a heading has no sluggable text.
const FALLBACK_ANCHOR: &str = "section";

/// Slugify heading text.
pub fn slugify(text: &str, style: AnchorStyle) -> String {
    let slug = match style {
        AnchorStyle::Unicode => slugify_unicode(text),
        AnchorStyle::Ascii => slugify_ascii(text),
    };
    if slug.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        slug
    }
}

fn slugify_unicode(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            slug.push('-');
        } else if c.is_alphanumeric() || c == '-' || c == '_' {
            slug.push(c);
        }
    }
    slug
}

fn slugify_ascii(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Hands out unique anchors within one document.
///
/// A repeated anchor gets `-1`, `-2`, ... appended in document order.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: FxHashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `base`, or the first free suffixed variant of it.
    pub fn claim(&mut self, base: &str) -> String {
        let mut slug = base.to_string();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.to_string()).or_insert(0);
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }
}
