//! Render backend trait carrying the per-construct markup rules.
//!
//! Every method has a default implementation emitting plain semantic HTML.
//! A backend only overrides the constructs it styles; everything it leaves
//! alone falls back to the default rule, so unknown or unstyled constructs
//! always render.

use std::fmt::Write;

use crate::state::escape_html;

/// Backend trait for per-construct rendering operations.
///
/// Methods write balanced fragments into `out`; a fragment opened by a
/// `*_start` method is closed by the matching `*_end` method at the same
/// nesting depth, so concatenated output never has dangling tags.
pub trait RenderBackend {
    /// Render a complete heading block.
    ///
    /// `text` is the heading's plain text, `html` its inline-rendered body.
    /// The default rule emits `<hN>` with the literal text as anchor id.
    fn heading(level: u8, text: &str, html: &str, out: &mut String) {
        write!(
            out,
            r#"<h{level} id="{}">{}</h{level}>"#,
            escape_html(text),
            html.trim()
        )
        .unwrap();
    }

    /// Render a paragraph from its buffered inline markup.
    ///
    /// `html` is trusted raw markup already produced by inline rendering and
    /// must not be re-escaped.
    fn paragraph(html: &str, out: &mut String) {
        write!(out, "<p>{html}</p>").unwrap();
    }

    /// Render a fenced or indented code block.
    ///
    /// Returns a warning when the block could not be rendered as requested
    /// (e.g. a highlighting failure that forced a plain-text fallback).
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) -> Option<String> {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
        None
    }

    /// Render an inline code span. `code` is the span's raw text.
    fn inline_code(code: &str, out: &mut String) {
        write!(out, "<code>{}</code>", escape_html(code)).unwrap();
    }

    /// Render a link opening tag. `href` and `title` may be empty strings.
    fn link_start(href: &str, title: &str, out: &mut String) {
        if title.is_empty() {
            write!(out, r#"<a href="{}">"#, escape_html(href)).unwrap();
        } else {
            write!(
                out,
                r#"<a href="{}" title="{}">"#,
                escape_html(href),
                escape_html(title)
            )
            .unwrap();
        }
    }

    /// Render a link closing tag.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render a list opening tag. `start` is `Some` for ordered lists.
    fn list_start(start: Option<u64>, out: &mut String) {
        match start {
            Some(1) => out.push_str("<ol>"),
            Some(n) => write!(out, r#"<ol start="{n}">"#).unwrap(),
            None => out.push_str("<ul>"),
        }
    }

    /// Render a list closing tag.
    fn list_end(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }

    /// Render a table opening tag.
    fn table_start(out: &mut String) {
        out.push_str("<table>");
    }

    /// Render a table row opening tag (used for header and body rows).
    fn table_row_start(out: &mut String) {
        out.push_str("<tr>");
    }

    /// Render a table cell opening tag.
    ///
    /// `align` is a preformatted style attribute (possibly empty); backends
    /// may ignore it.
    fn table_cell_start(header: bool, align: &str, out: &mut String) {
        let tag = if header { "th" } else { "td" };
        write!(out, "<{tag}{align}>").unwrap();
    }

    /// Render a table cell closing tag.
    fn table_cell_end(header: bool, out: &mut String) {
        out.push_str(if header { "</th>" } else { "</td>" });
    }

    /// Render a blockquote opening tag.
    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    /// Render a blockquote closing tag.
    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    /// Render an image.
    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}

/// Backend using only the default rules.
///
/// Produces unstyled semantic HTML. Useful for tests and for consumers that
/// bring their own stylesheet contract.
pub struct PlainHtmlBackend;

impl RenderBackend for PlainHtmlBackend {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_heading() {
        let mut out = String::new();
        PlainHtmlBackend::heading(2, "Section", "Section", &mut out);
        assert_eq!(out, r#"<h2 id="Section">Section</h2>"#);
    }

    #[test]
    fn test_default_code_block_with_language() {
        let mut out = String::new();
        let warning = PlainHtmlBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
        assert!(warning.is_none());
    }

    #[test]
    fn test_default_code_block_without_language() {
        let mut out = String::new();
        let warning = PlainHtmlBackend::code_block(None, "plain", &mut out);
        assert_eq!(out, "<pre><code>plain</code></pre>");
        assert!(warning.is_none());
    }

    #[test]
    fn test_default_link_without_title() {
        let mut out = String::new();
        PlainHtmlBackend::link_start("https://example.com", "", &mut out);
        PlainHtmlBackend::link_end(&mut out);
        assert_eq!(out, r#"<a href="https://example.com"></a>"#);
    }

    #[test]
    fn test_default_link_with_title() {
        let mut out = String::new();
        PlainHtmlBackend::link_start("/x", "a title", &mut out);
        assert_eq!(out, r#"<a href="/x" title="a title">"#);
    }

    #[test]
    fn test_default_ordered_list_with_start() {
        let mut out = String::new();
        PlainHtmlBackend::list_start(Some(3), &mut out);
        PlainHtmlBackend::list_end(true, &mut out);
        assert_eq!(out, r#"<ol start="3"></ol>"#);
    }

    #[test]
    fn test_default_table_cell_alignment() {
        let mut out = String::new();
        PlainHtmlBackend::table_cell_start(false, r#" style="text-align:left""#, &mut out);
        PlainHtmlBackend::table_cell_end(false, &mut out);
        assert_eq!(out, r#"<td style="text-align:left"></td>"#);
    }

    #[test]
    fn test_default_image_with_title() {
        let mut out = String::new();
        PlainHtmlBackend::image("image.png", "Alt", "Title", &mut out);
        assert_eq!(out, r#"<img src="image.png" title="Title" alt="Alt">"#);
    }
}
