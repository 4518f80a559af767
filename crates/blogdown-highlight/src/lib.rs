//! Syntax highlighting for fenced code blocks.
//!
//! Wraps [`syntect`] with a process-wide grammar registry so that resolving
//! a language token is done once per process and repeat registrations are
//! no-ops. Output is classed HTML (`<span class="...">` fragments) that an
//! external stylesheet colors, the same contract a client-side highlighter
//! would produce.
//!
//! # Example
//!
//! ```
//! let html = blogdown_highlight::highlight("rust", "fn main() {}\n").unwrap();
//! assert!(html.contains("<span"));
//! ```

mod registry;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::util::LinesWithEndings;

pub use registry::{ensure_registered, is_registered, syntax_set};

/// Error produced while generating highlighted markup.
///
/// Callers that must stay total (markdown rendering never fails a whole
/// document over one code block) are expected to fall back to escaped plain
/// text when they receive this.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The syntect line parser rejected a line of input.
    #[error("highlighting failed for language `{language}`: {message}")]
    Parse {
        /// Language token the grammar was resolved for.
        language: String,
        /// Underlying parser message.
        message: String,
    },
}

/// Highlight `code` as `language`, returning classed HTML span markup.
///
/// The language token is resolved through the grammar registry; unknown
/// tokens fall back to the plain-text grammar rather than failing. The
/// returned markup contains only `<span>` fragments and escaped text, with
/// no surrounding `<pre>`/`<code>` element.
pub fn highlight(language: &str, code: &str) -> Result<String, HighlightError> {
    let syntax = ensure_registered(language);

    // syntect's line parser requires every line to end with a newline.
    let mut source = code.to_owned();
    if !source.ends_with('\n') {
        source.push('\n');
    }

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set(), ClassStyle::Spaced);
    for line in LinesWithEndings::from(source.as_str()) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|err| HighlightError::Parse {
                language: language.to_owned(),
                message: err.to_string(),
            })?;
    }

    Ok(generator.finalize())
}
