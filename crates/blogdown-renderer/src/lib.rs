//! Styled markdown renderer for blog posts.
//!
//! Converts a post's markdown body into the HTML fragments the blog's
//! stylesheet expects. Parsing is delegated to [`pulldown_cmark`]; this crate
//! post-processes the event stream (raw-HTML escaping, codespan cleanup) and
//! renders each construct through a [`RenderBackend`].
//!
//! # Architecture
//!
//! - [`PostProcess`]: once-per-event cleanup applied before rendering.
//! - [`RenderBackend`]: per-construct markup rules. Default trait methods
//!   emit plain semantic HTML; [`StyledHtmlBackend`] overrides the constructs
//!   the blog styles (headings, code, lists, links, tables, paragraphs).
//! - [`MarkdownRenderer`]: drives the event stream and assembles the output.
//!
//! # Example
//!
//! ```
//! let html = blogdown_renderer::render_html("# Hello\n\nWorld");
//! assert!(html.contains(r##"<a href="#Hello">Hello</a>"##));
//! ```

mod backend;
mod image;
mod postprocess;
mod renderer;
mod state;
mod styled;
mod util;

pub use backend::{PlainHtmlBackend, RenderBackend};
pub use image::{ImageRef, first_image};
pub use postprocess::{PostProcess, escape_raw_html};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html};
pub use styled::StyledHtmlBackend;

/// Convert markdown to styled HTML with the process-wide configuration.
///
/// This is the conversion entry point the blog page calls: one markdown
/// string in, one HTML fragment string out. Rendering is total; malformed
/// input degrades to default handling rather than failing.
pub fn render_html(markdown: &str) -> String {
    MarkdownRenderer::<StyledHtmlBackend>::new()
        .render_markdown(markdown)
        .html
}
