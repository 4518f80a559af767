//! Once-per-event post-processing applied before rendering.
//!
//! Two corrections run over the raw event stream:
//!
//! - Raw HTML events have `<`, `>`, `&` and `"` escaped to entities, so an
//!   authored HTML fragment can never inject a live tag into the output.
//! - Codespan events that still carry a single backtick delimiter on each
//!   side are unwrapped to their display text.
//!
//! Every other event passes through unchanged.

use pulldown_cmark::{CowStr, Event};

/// Iterator adapter applying the post-processing pass to an event stream.
pub struct PostProcess<I> {
    inner: I,
}

impl<I> PostProcess<I> {
    /// Wrap an event iterator.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'a, I> Iterator for PostProcess<I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(postprocess_event)
    }
}

fn postprocess_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(html) => Event::Html(escape_raw_html_cow(html)),
        Event::InlineHtml(html) => Event::InlineHtml(escape_raw_html_cow(html)),
        Event::Code(code) => Event::Code(unwrap_codespan(code)),
        other => other,
    }
}

/// Escape the four characters `<`, `>`, `&`, `"` to their entities.
///
/// All other characters pass through untouched. This is deliberately
/// narrower than text escaping: it neutralizes tags and attribute quoting in
/// authored raw HTML without rewriting anything else.
#[must_use]
pub fn escape_raw_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_raw_html_cow(html: CowStr<'_>) -> CowStr<'_> {
    if html.contains(['<', '>', '&', '"']) {
        CowStr::from(escape_raw_html(&html))
    } else {
        html
    }
}

/// Strip one backtick delimiter pair from a codespan capture, if present.
fn unwrap_codespan(code: CowStr<'_>) -> CowStr<'_> {
    if code.len() >= 2 && code.starts_with('`') && code.ends_with('`') {
        CowStr::from(code[1..code.len() - 1].to_owned())
    } else {
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn process(event: Event<'_>) -> Event<'_> {
        PostProcess::new(std::iter::once(event)).next().unwrap()
    }

    #[test]
    fn test_escape_raw_html_four_characters() {
        assert_eq!(
            escape_raw_html(r#"<script src="x">&"#),
            "&lt;script src=&quot;x&quot;&gt;&amp;"
        );
    }

    #[test]
    fn test_escape_raw_html_leaves_other_characters() {
        assert_eq!(escape_raw_html("it's 100% fine"), "it's 100% fine");
    }

    #[test]
    fn test_html_event_is_escaped() {
        let event = process(Event::Html(CowStr::Borrowed("<script>alert(1)</script>")));
        let Event::Html(html) = event else {
            panic!("event kind changed");
        };
        assert_eq!(html.as_ref(), "&lt;script&gt;alert(1)&lt;/script&gt;");
    }

    #[test]
    fn test_inline_html_event_is_escaped() {
        let event = process(Event::InlineHtml(CowStr::Borrowed("<b>")));
        let Event::InlineHtml(html) = event else {
            panic!("event kind changed");
        };
        assert_eq!(html.as_ref(), "&lt;b&gt;");
    }

    #[test]
    fn test_codespan_delimiters_are_unwrapped() {
        let event = process(Event::Code(CowStr::Borrowed("`x`")));
        let Event::Code(code) = event else {
            panic!("event kind changed");
        };
        assert_eq!(code.as_ref(), "x");
    }

    #[test]
    fn test_codespan_without_delimiters_passes_through() {
        let event = process(Event::Code(CowStr::Borrowed("x")));
        let Event::Code(code) = event else {
            panic!("event kind changed");
        };
        assert_eq!(code.as_ref(), "x");
    }

    #[test]
    fn test_single_backtick_codespan_not_unwrapped() {
        // One character cannot be a wrapped capture.
        let event = process(Event::Code(CowStr::Borrowed("`")));
        let Event::Code(code) = event else {
            panic!("event kind changed");
        };
        assert_eq!(code.as_ref(), "`");
    }

    #[test]
    fn test_other_events_pass_through() {
        let event = process(Event::Text(CowStr::Borrowed("<plain>")));
        assert_eq!(event, Event::Text(CowStr::Borrowed("<plain>")));
    }
}
