//! Reading-time estimation from raw Markdown.
//!
//! Markup is stripped before counting: fenced code, inline code, link
//! targets and emphasis/heading markers never add to the estimate. English
//! text is counted in words, Chinese text in CJK ideographs plus whatever
//! words remain. The result is rounded up and never below one minute.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::{Locale, ReadingScript};

static FENCED_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));
static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_~`]").expect("valid regex"));
static NEWLINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));

/// Default reading speed for word-counted locales.
pub const WORDS_PER_MINUTE: u32 = 225;
/// Default reading speed for CJK-counted locales.
pub const CJK_UNITS_PER_MINUTE: u32 = 350;

/// Reading speeds used by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReadingTime {
    pub words_per_minute: u32,
    pub cjk_units_per_minute: u32,
}

impl Default for ReadingTime {
    fn default() -> Self {
        Self {
            words_per_minute: WORDS_PER_MINUTE,
            cjk_units_per_minute: CJK_UNITS_PER_MINUTE,
        }
    }
}

impl ReadingTime {
    /// Estimated minutes to read `content` in `locale`. Always at least 1.
    pub fn estimate(&self, content: &str, locale: Locale) -> u32 {
        let text = strip_markdown(content);

        let (units, rate) = match locale.reading_script() {
            ReadingScript::Words => (count_words(&text), self.words_per_minute),
            ReadingScript::Cjk => {
                let (ideographs, rest) = split_cjk(&text);
                (ideographs + count_words(&rest), self.cjk_units_per_minute)
            }
        };

        minutes(units, rate)
    }
}

/// Estimate with the default reading speeds.
pub fn estimate_reading_time(content: &str, locale: Locale) -> u32 {
    ReadingTime::default().estimate(content, locale)
}

/// Remove markup that should not count as reading material.
fn strip_markdown(content: &str) -> String {
    let text = FENCED_CODE_RE.replace_all(content, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = MARKER_RE.replace_all(&text, "");
    let text = NEWLINES_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Whether `c` lies in the CJK Unified Ideographs block.
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Count CJK ideographs and return the text with them removed.
fn split_cjk(text: &str) -> (usize, String) {
    let mut count = 0;
    let rest = text
        .chars()
        .filter(|&c| {
            let cjk = is_cjk_ideograph(c);
            count += usize::from(cjk);
            !cjk
        })
        .collect();
    (count, rest)
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[allow(clippy::cast_possible_truncation)] // Saturated below
fn minutes(units: usize, rate: u32) -> u32 {
    let rate = rate.max(1) as usize;
    units.div_ceil(rate).clamp(1, u32::MAX as usize) as u32
}
