//! Event-stream pipeline.
//!
//! A post body is parsed once into a `Vec<Event>`; each transform takes the
//! stream and hands back a rewritten one. Serialisation happens last.

use pulldown_cmark::{Event, Options, Parser, TextMergeStream, html};

/// A rewrite over the parsed event stream.
pub trait Transform<'a> {
    fn transform(self, events: Vec<Event<'a>>) -> Vec<Event<'a>>;
}

/// Parsed Markdown moving through a chain of transforms.
pub struct Pipeline<'a> {
    events: Vec<Event<'a>>,
}

impl<'a> Pipeline<'a> {
    /// Parse `markdown` with `options`. Adjacent text events are merged.
    pub fn parse(markdown: &'a str, options: Options) -> Self {
        let parser = Parser::new_ext(markdown, options);
        Self {
            events: TextMergeStream::new(parser).collect(),
        }
    }

    pub fn pipe(self, transform: impl Transform<'a>) -> Self {
        Self {
            events: transform.transform(self.events),
        }
    }

    /// Apply `transform` only when `enabled`.
    pub fn pipe_if(self, enabled: bool, transform: impl Transform<'a>) -> Self {
        if enabled { self.pipe(transform) } else { self }
    }

    pub fn into_inner(self) -> Vec<Event<'a>> {
        self.events
    }

    /// Serialize to HTML.
    pub fn into_html(self, capacity: usize) -> String {
        let mut out = String::with_capacity(capacity);
        html::push_html(&mut out, self.events.into_iter());
        out
    }
}
