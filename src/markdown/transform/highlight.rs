//! Fenced code highlighting with a light and a dark theme at once.
//!
//! Every token carries both colours as CSS custom properties:
//!
//! ```html
//! <pre class="folio-code" data-language="rust"><code class="language-rust" data-language="rust">
//! <span style="--folio-light:#a71d5d;--folio-dark:#b48ead">fn</span> …
//! </code></pre>
//! ```
//!
//! A stylesheet picks one, e.g. `color: var(--folio-light)` and
//! `color: var(--folio-dark)` under `prefers-color-scheme: dark`. Blocks with
//! no language, or one the bundled grammars do not know, are emitted as
//! escaped plain text in the same container.

use std::sync::{Arc, LazyLock};

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use pulldown_cmark_escape::escape_html;
use serde::{Deserialize, Serialize};
use syntect::easy::ScopeRegionIterator;
use syntect::highlighting::{Color, Highlighter, Theme, ThemeSet};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::debug;
use crate::markdown::RenderError;
use crate::markdown::pipeline::Transform;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// `[highlight]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HighlightConfig {
    /// Bundled theme used for `--<prefix>-light`.
    pub light_theme: String,
    /// Bundled theme used for `--<prefix>-dark`.
    pub dark_theme: String,
    /// Prefix for the container class and the colour properties.
    pub css_prefix: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            light_theme: "InspiredGitHub".into(),
            dark_theme: "base16-ocean.dark".into(),
            css_prefix: "folio".into(),
        }
    }
}

/// Names of the bundled themes.
pub fn theme_names() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

/// Resolved themes, shared by every render.
#[derive(Debug)]
pub struct Themes {
    light: Theme,
    dark: Theme,
    prefix: String,
}

impl Themes {
    pub fn load(config: &HighlightConfig) -> Result<Self, RenderError> {
        let theme = |name: &str| {
            THEMES
                .themes
                .get(name)
                .cloned()
                .ok_or_else(|| RenderError::UnknownTheme(name.to_string()))
        };
        Ok(Self {
            light: theme(&config.light_theme)?,
            dark: theme(&config.dark_theme)?,
            prefix: config.css_prefix.clone(),
        })
    }
}

/// Replaces code blocks with highlighted HTML.
pub struct CodeHighlighter {
    themes: Arc<Themes>,
}

impl CodeHighlighter {
    pub fn new(themes: Arc<Themes>) -> Self {
        Self { themes }
    }
}

impl<'a> Transform<'a> for CodeHighlighter {
    fn transform(self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        // Language and collected text of the open code block
        let mut block: Option<(Option<String>, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    block = Some((lang, String::new()));
                }
                Event::Text(text) if block.is_some() => {
                    if let Some((_, code)) = block.as_mut() {
                        code.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = block.take() {
                        let html = render_block(&self.themes, lang.as_deref(), &code);
                        out.push(Event::Html(CowStr::from(html)));
                    }
                }
                other => out.push(other),
            }
        }

        out
    }
}

/// First word of a fence info string, e.g. `rust` in ```` ```rust title="x" ````.
fn info_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    SYNTAXES
        .find_syntax_by_token(lang)
        .or_else(|| SYNTAXES.find_syntax_by_token(&lang.to_ascii_lowercase()))
}

fn render_block(themes: &Themes, lang: Option<&str>, code: &str) -> String {
    let prefix = &themes.prefix;
    let mut html = String::with_capacity(code.len() * 2);

    if let Some(lang) = lang
        && let Some(syntax) = find_syntax(lang)
    {
        match highlight(themes, syntax, code) {
            Ok(body) => {
                let mut lang_attr = String::new();
                let _ = escape_html(&mut lang_attr, lang);
                html.push_str(&format!(
                    r#"<pre class="{prefix}-code" data-language="{lang_attr}"><code class="language-{lang_attr}" data-language="{lang_attr}">"#
                ));
                html.push_str(&body);
                html.push_str("</code></pre>\n");
                return html;
            }
            Err(e) => debug!("highlight"; "falling back to plain text for `{lang}`: {e}"),
        }
    }

    html.push_str(&format!(r#"<pre class="{prefix}-code"><code"#));
    if let Some(lang) = lang {
        html.push_str(" class=\"language-");
        let _ = escape_html(&mut html, lang);
        html.push('"');
    }
    html.push('>');
    let _ = escape_html(&mut html, code);
    html.push_str("</code></pre>\n");
    html
}

/// Tokenize `code` and emit one span per run of identically coloured text.
fn highlight(themes: &Themes, syntax: &SyntaxReference, code: &str) -> Result<String, String> {
    let light = Highlighter::new(&themes.light);
    let dark = Highlighter::new(&themes.dark);
    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();

    let mut html = String::with_capacity(code.len() * 4);
    let mut run = TokenRun::default();

    for line in LinesWithEndings::from(code) {
        let ops = state
            .parse_line(line, &SYNTAXES)
            .map_err(|e| e.to_string())?;
        for (text, op) in ScopeRegionIterator::new(&ops, line) {
            stack.apply(op).map_err(|e| e.to_string())?;
            if text.is_empty() {
                continue;
            }
            let colors = (
                light.style_for_stack(stack.as_slice()).foreground,
                dark.style_for_stack(stack.as_slice()).foreground,
            );
            run.push(&mut html, &themes.prefix, colors, text);
        }
    }
    run.flush(&mut html, &themes.prefix);

    Ok(html)
}

/// Pending text sharing one colour pair.
#[derive(Default)]
struct TokenRun {
    colors: Option<(Color, Color)>,
    text: String,
}

impl TokenRun {
    fn push(&mut self, html: &mut String, prefix: &str, colors: (Color, Color), text: &str) {
        if self.colors != Some(colors) {
            self.flush(html, prefix);
            self.colors = Some(colors);
        }
        self.text.push_str(text);
    }

    fn flush(&mut self, html: &mut String, prefix: &str) {
        let Some((light, dark)) = self.colors.take() else {
            return;
        };
        if self.text.is_empty() {
            return;
        }
        html.push_str(&format!(
            r#"<span style="--{prefix}-light:{};--{prefix}-dark:{}">"#,
            hex(light),
            hex(dark)
        ));
        let _ = escape_html(&mut *html, &self.text);
        html.push_str("</span>");
        self.text.clear();
    }
}

fn hex(color: Color) -> String {
    if color.a == 0xff {
        format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
    }
}
