//! `$…$` and `$$…$$` spans rendered to MathML.
//!
//! Rendered math is wrapped in `<span class="math math-inline">` or
//! `<span class="math math-display">` so stylesheets can target it. LaTeX that
//! fails to parse is kept as escaped source with the error in `title`, so a
//! bad formula never takes the whole post down.

use pulldown_cmark::{CowStr, Event};
use pulldown_cmark_escape::escape_html;
use pulldown_latex::config::{DisplayMode, RenderConfig};
use pulldown_latex::mathml::push_mathml;
use pulldown_latex::{Parser, Storage};

use crate::debug;
use crate::markdown::pipeline::Transform;

/// Replaces math events with rendered HTML.
pub struct MathRenderer;

impl<'a> Transform<'a> for MathRenderer {
    fn transform(self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        events
            .into_iter()
            .map(|event| match event {
                Event::InlineMath(latex) => {
                    Event::InlineHtml(CowStr::from(render_math(&latex, false)))
                }
                Event::DisplayMath(latex) => {
                    Event::InlineHtml(CowStr::from(render_math(&latex, true)))
                }
                other => other,
            })
            .collect()
    }
}

/// Render one formula to its wrapped HTML.
pub fn render_math(latex: &str, display: bool) -> String {
    let class = if display { "math-display" } else { "math-inline" };
    match to_mathml(latex, display) {
        Ok(mathml) => format!(r#"<span class="math {class}">{mathml}</span>"#),
        Err(message) => {
            debug!("math"; "cannot render `{latex}`: {message}");
            let mut source = String::new();
            let mut title = String::new();
            let _ = escape_html(&mut source, latex);
            let _ = escape_html(&mut title, &message);
            format!(
                r#"<span class="math math-error {class}" title="{title}"><code>{source}</code></span>"#
            )
        }
    }
}

fn to_mathml(latex: &str, display: bool) -> Result<String, String> {
    let storage = Storage::new();
    let config = RenderConfig {
        display_mode: if display {
            DisplayMode::Block
        } else {
            DisplayMode::Inline
        },
        ..Default::default()
    };

    let events: Vec<_> = Parser::new(latex, &storage).collect();
    let errors: Vec<String> = events
        .iter()
        .filter_map(|event| event.as_ref().err().map(ToString::to_string))
        .collect();
    if !errors.is_empty() {
        return Err(errors.join("; "));
    }

    let mut mathml = String::new();
    push_mathml(&mut mathml, events.into_iter(), config).map_err(|e| e.to_string())?;
    Ok(mathml)
}
