//! Supported content locales.
//!
//! Locales form a closed set: every member owns a content directory and a
//! reading strategy. Codes outside the set are rejected instead of being
//! folded into the default locale.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContentError;

/// A content locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default).
    #[default]
    En,
    /// Chinese.
    Zh,
}

/// How reading time is counted for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingScript {
    /// Whitespace-separated words.
    Words,
    /// CJK ideographs counted one by one, plus any remaining words.
    Cjk,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

    /// Locale code, also used as the content directory name.
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    pub const fn reading_script(self) -> ReadingScript {
        match self {
            Self::En => ReadingScript::Words,
            Self::Zh => ReadingScript::Cjk,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ContentError::UnsupportedLocale(s.to_string()))
    }
}
