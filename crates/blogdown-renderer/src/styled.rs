//! Styled backend for blog post rendering.
//!
//! Overrides the constructs the blog's stylesheet targets. The utility class
//! strings are a fixed visual contract with that stylesheet and must be kept
//! verbatim; changing one silently breaks the page styling.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// Highlight language used when a fence carries no tag.
const DEFAULT_LANGUAGE: &str = "javascript";

/// Heading classes by level. Level 6 shares the catch-all default bucket,
/// including its leading space.
fn heading_class(level: u8) -> &'static str {
    match level {
        1 => "text-4xl my-5 font-bold border-b pb-3",
        2 => "text-3xl my-4 font-bold border-b pb-3",
        3 => "text-2xl my-3 font-bold border-b pb-3",
        4 => "text-xl my-2 font-bold border-b pb-3",
        5 => "text-lg my-1 font-bold border-b pb-3",
        _ => " border-b font-bold pb-3",
    }
}

/// Blog backend emitting styled HTML fragments.
///
/// Headings become anchored blocks, code blocks get window chrome and syntax
/// highlighting, paragraphs split on newlines, links always open in a new
/// browsing context. Constructs without an override here use the default
/// rules from [`RenderBackend`].
pub struct StyledHtmlBackend;

impl RenderBackend for StyledHtmlBackend {
    /// Anchored heading block.
    ///
    /// The id and anchor use the literal heading text, escaped only for
    /// attribute safety. Duplicate headings therefore share an id; the
    /// visible text is the plain heading text, not its inline markup.
    fn heading(level: u8, text: &str, _html: &str, out: &mut String) {
        let class = heading_class(level);
        let text = escape_html(text);
        write!(
            out,
            r##"<div id="{text}" class="{class}"><a href="#{text}">{text}</a></div>"##
        )
        .unwrap();
    }

    /// One styled paragraph block per newline-separated segment.
    fn paragraph(html: &str, out: &mut String) {
        for segment in html.split('\n') {
            write!(
                out,
                r#"<p class="my-3 indent-8 leading-10 text-xl">{segment}</p>"#
            )
            .unwrap();
        }
    }

    /// Window-chrome code block with highlighted content.
    ///
    /// The highlighted markup is trusted and embedded verbatim. A
    /// highlighting failure falls back to escaped plain text and surfaces as
    /// a warning instead of failing the render.
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) -> Option<String> {
        let language = lang.unwrap_or(DEFAULT_LANGUAGE).to_ascii_lowercase();
        let (body, warning) = match blogdown_highlight::highlight(&language, content) {
            Ok(html) => (html, None),
            Err(err) => {
                tracing::warn!(language = %language, error = %err, "falling back to plain text");
                (escape_html(content), Some(err.to_string()))
            }
        };
        write!(
            out,
            r#"<div class="bg-gray-800 text-gray-200 flex flex-col my-1 rounded-lg px-3 py-1 pb-3"><div class="space-x-3 flex py-2"><span class="rounded-full w-3 h-3 bg-red-500"></span><span class="rounded-full w-3 h-3 bg-yellow-400"></span><span class="rounded-full w-3 h-3 bg-gray-400"></span></div><code>{body}</code></div>"#
        )
        .unwrap();
        warning
    }

    fn inline_code(code: &str, out: &mut String) {
        write!(
            out,
            r#"<code class="bg-gray-200 text-gray-800 text-opacity-90 px-2 rounded-md">{}</code>"#,
            escape_html(code)
        )
        .unwrap();
    }

    /// Anchor that always opens in a new browsing context. Absent href or
    /// title render as empty attributes, never as a literal "null".
    fn link_start(href: &str, title: &str, out: &mut String) {
        write!(
            out,
            r#"<a class="underline" target="_blank" href="{}" title="{}">"#,
            escape_html(href),
            escape_html(title)
        )
        .unwrap();
    }

    /// Both list kinds render as `ul`; only the marker class differs.
    fn list_start(start: Option<u64>, out: &mut String) {
        let class = if start.is_some() {
            "list-decimal pl-16 space-y-4 my-3"
        } else {
            "list-disc pl-16 space-y-4 my-3"
        };
        write!(out, r#"<ul class="{class}">"#).unwrap();
    }

    fn list_end(_ordered: bool, out: &mut String) {
        out.push_str("</ul>");
    }

    fn table_start(out: &mut String) {
        out.push_str(r#"<table class="border-collapse table-fixed border">"#);
    }

    fn table_row_start(out: &mut String) {
        out.push_str(r#"<tr class="even:bg-gray-100">"#);
    }

    /// Alignment is accepted but not applied; only the header flag matters.
    fn table_cell_start(header: bool, _align: &str, out: &mut String) {
        out.push_str(if header {
            r#"<th class="p-1 border">"#
        } else {
            r#"<td class="p-1 border">"#
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_heading_levels_map_to_distinct_classes() {
        let classes: Vec<_> = (1..=5).map(heading_class).collect();
        for (i, class) in classes.iter().enumerate() {
            for other in &classes[i + 1..] {
                assert_ne!(class, other);
            }
        }
    }

    #[test]
    fn test_heading_level_six_uses_default_bucket() {
        assert_eq!(heading_class(6), " border-b font-bold pb-3");
    }

    #[test]
    fn test_heading_block_markup() {
        let mut out = String::new();
        StyledHtmlBackend::heading(1, "Hello", "Hello", &mut out);
        assert_eq!(
            out,
            r##"<div id="Hello" class="text-4xl my-5 font-bold border-b pb-3"><a href="#Hello">Hello</a></div>"##
        );
    }

    #[test]
    fn test_paragraph_splits_on_newlines() {
        let mut out = String::new();
        StyledHtmlBackend::paragraph("one\ntwo", &mut out);
        assert_eq!(
            out,
            r#"<p class="my-3 indent-8 leading-10 text-xl">one</p><p class="my-3 indent-8 leading-10 text-xl">two</p>"#
        );
    }

    #[test]
    fn test_paragraph_passes_markup_through_unescaped() {
        let mut out = String::new();
        StyledHtmlBackend::paragraph("<em>hi</em>", &mut out);
        assert!(out.contains("<em>hi</em>"));
    }

    #[test]
    fn test_code_block_window_chrome() {
        let mut out = String::new();
        let warning = StyledHtmlBackend::code_block(Some("rust"), "fn main() {}\n", &mut out);
        assert!(warning.is_none());
        assert!(out.contains("bg-red-500"));
        assert!(out.contains("bg-yellow-400"));
        assert!(out.contains("bg-gray-400"));
        assert!(out.starts_with(r#"<div class="bg-gray-800"#));
        assert!(out.ends_with("</code></div>"));
    }

    #[test]
    fn test_code_block_defaults_language() {
        // No tag must fall back to the default language and still render.
        let mut out = String::new();
        let warning = StyledHtmlBackend::code_block(None, "const x = 1;\n", &mut out);
        assert!(warning.is_none());
        assert!(out.contains("<code>"));
    }

    #[test]
    fn test_inline_code_classes() {
        let mut out = String::new();
        StyledHtmlBackend::inline_code("x", &mut out);
        assert_eq!(
            out,
            r#"<code class="bg-gray-200 text-gray-800 text-opacity-90 px-2 rounded-md">x</code>"#
        );
    }

    #[test]
    fn test_link_defaults_to_empty_attributes() {
        let mut out = String::new();
        StyledHtmlBackend::link_start("", "", &mut out);
        assert_eq!(
            out,
            r#"<a class="underline" target="_blank" href="" title="">"#
        );
    }

    #[test]
    fn test_ordered_and_unordered_lists_differ_only_in_marker_class() {
        let mut ordered = String::new();
        StyledHtmlBackend::list_start(Some(1), &mut ordered);
        let mut unordered = String::new();
        StyledHtmlBackend::list_start(None, &mut unordered);
        assert_eq!(ordered, r#"<ul class="list-decimal pl-16 space-y-4 my-3">"#);
        assert_eq!(unordered, r#"<ul class="list-disc pl-16 space-y-4 my-3">"#);
    }

    #[test]
    fn test_table_cell_ignores_alignment() {
        let mut out = String::new();
        StyledHtmlBackend::table_cell_start(false, r#" style="text-align:center""#, &mut out);
        assert_eq!(out, r#"<td class="p-1 border">"#);
    }

    #[test]
    fn test_table_header_cell() {
        let mut out = String::new();
        StyledHtmlBackend::table_cell_start(true, "", &mut out);
        assert_eq!(out, r#"<th class="p-1 border">"#);
    }
}
