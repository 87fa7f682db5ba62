//! Heading `id` attributes.

use pulldown_cmark::{CowStr, Event, Tag, TagEnd};

use crate::markdown::pipeline::Transform;
use crate::markdown::slug::{AnchorStyle, Slugger, slugify};

/// Gives every heading a unique `id`.
///
/// Headings without an explicit `{#id}` get one slugified from their text.
/// Explicit and generated ids share one namespace, so a clash with an
/// earlier heading is suffixed either way.
pub struct HeadingAnchors {
    style: AnchorStyle,
}

impl HeadingAnchors {
    pub fn new(style: AnchorStyle) -> Self {
        Self { style }
    }
}

impl<'a> Transform<'a> for HeadingAnchors {
    fn transform(self, mut events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut slugger = Slugger::new();

        for i in 0..events.len() {
            if !matches!(events[i], Event::Start(Tag::Heading { .. })) {
                continue;
            }
            let text = heading_text(&events[i + 1..]);
            if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                let base = match id.as_deref() {
                    Some(explicit) if !explicit.is_empty() => explicit.to_string(),
                    _ => slugify(&text, self.style),
                };
                *id = Some(CowStr::from(slugger.claim(&base)));
            }
        }

        events
    }
}

/// Concatenated text of a heading, up to its end tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(s) | Event::Code(s) | Event::InlineMath(s) => text.push_str(s),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}
