//! Post records produced by the loader.

use serde::Serialize;
use serde_json::Value;

use super::Locale;
use super::error::FrontMatterError;
use crate::JsonMap;

/// Keys with a fixed meaning; everything else lands in `extra`.
const STANDARD_KEYS: [&str; 4] = ["title", "date", "summary", "readingTime"];

/// Post metadata: the three standard fields, the reading time, and any other
/// author-supplied keys in the order they were written.
///
/// # Standard Fields
///
/// | Field         | Type     | Default           |
/// |---------------|----------|-------------------|
/// | `title`       | `String` | `""`              |
/// | `date`        | `String` | `""`              |
/// | `summary`     | `String` | `""`              |
/// | `readingTime` | `u32`    | computed estimate |
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostMetadata {
    pub title: String,
    pub date: String,
    pub summary: String,
    /// Minutes. An explicit front-matter value wins over the estimate.
    pub reading_time: u32,
    /// Additional author-supplied fields.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl BlogPostMetadata {
    /// Build metadata from raw front-matter and a computed reading time.
    ///
    /// Defaults are laid down first, then the computed reading time, then
    /// every raw key, so an author-supplied `readingTime` replaces the
    /// estimate.
    pub fn assemble(raw: JsonMap, reading_time: u32) -> Result<Self, FrontMatterError> {
        let mut merged = JsonMap::new();
        merged.insert("title".into(), Value::String(String::new()));
        merged.insert("date".into(), Value::String(String::new()));
        merged.insert("summary".into(), Value::String(String::new()));
        merged.insert("readingTime".into(), Value::from(reading_time));
        merged.extend(raw);

        let title = string_field(&merged, "title")?;
        let date = string_field(&merged, "date")?;
        let summary = string_field(&merged, "summary")?;
        let reading_time = minutes_field(&merged, "readingTime")?;

        let extra = merged
            .into_iter()
            .filter(|(key, _)| !STANDARD_KEYS.contains(&key.as_str()))
            .collect();

        Ok(Self {
            title,
            date,
            summary,
            reading_time,
            extra,
        })
    }
}

/// Accept strings, stringify numbers and booleans, map `null` to `""`.
fn string_field(map: &JsonMap, field: &str) -> Result<String, FrontMatterError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(FrontMatterError::InvalidField {
            field: field.to_string(),
            message: format!("must be a string, found `{other}`"),
        }),
    }
}

fn minutes_field(map: &JsonMap, field: &str) -> Result<u32, FrontMatterError> {
    let value = map.get(field).unwrap_or(&Value::Null);
    value
        .as_u64()
        .and_then(|minutes| u32::try_from(minutes).ok())
        .ok_or_else(|| FrontMatterError::InvalidField {
            field: field.to_string(),
            message: format!("must be a non-negative integer, found `{value}`"),
        })
}

/// A rendered post for one slug and locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub metadata: BlogPostMetadata,
    /// File name without its extension.
    pub slug: String,
    /// Rendered HTML body.
    pub source: String,
    pub locale: Locale,
}

impl BlogPost {
    /// Sort by date descending, then slug ascending.
    ///
    /// Dates are compared as text, which orders ISO-8601 dates correctly.
    pub fn sort_newest_first(posts: &mut [BlogPost]) {
        posts.sort_by(|a, b| {
            b.metadata
                .date
                .cmp(&a.metadata.date)
                .then_with(|| a.slug.cmp(&b.slug))
        });
    }
}
