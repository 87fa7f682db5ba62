//! Front-matter splitting for YAML (`---`) and TOML (`+++`) blocks.
//!
//! The block must open on the first line of the file. Whatever follows the
//! closing delimiter line is the body, untouched.

use serde_json::Value;

use super::error::FrontMatterError;
use crate::JsonMap;

/// A file split into its raw metadata mapping and the remaining body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter<'a> {
    pub metadata: JsonMap,
    pub body: &'a str,
}

/// Front-matter flavour, selected by the opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Yaml,
    Toml,
}

impl Fence {
    const fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    fn from_line(line: &str) -> Option<Self> {
        match line.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Split raw file text into metadata and body.
///
/// Text without an opening delimiter has empty metadata and is all body.
pub fn split(content: &str) -> Result<FrontMatter<'_>, FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some((fence, block, body)) = detect(content)? else {
        return Ok(FrontMatter {
            metadata: JsonMap::new(),
            body: content,
        });
    };

    let metadata = match fence {
        Fence::Yaml => parse_yaml(block)?,
        Fence::Toml => parse_toml(block)?,
    };

    Ok(FrontMatter { metadata, body })
}

/// Locate the front-matter block.
/// Returns `(fence, block, body)` if the text opens with a delimiter line.
fn detect(content: &str) -> Result<Option<(Fence, &str, &str)>, FrontMatterError> {
    let (first, rest) = match content.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (content, ""),
    };
    let Some(fence) = Fence::from_line(first) else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence.delimiter() {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((fence, block, body)));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated {
        delimiter: fence.delimiter(),
    })
}

fn parse_yaml(block: &str) -> Result<JsonMap, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(JsonMap::new());
    }
    // Dates stay strings: serde_yaml has no timestamp type.
    let value: Value = serde_yaml::from_str(block)?;
    into_mapping(value)
}

fn parse_toml(block: &str) -> Result<JsonMap, FrontMatterError> {
    let table: toml::Table = toml::from_str(block)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn into_mapping(value: Value) -> Result<JsonMap, FrontMatterError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}

/// Convert a TOML value to JSON, rendering datetimes as their TOML text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
