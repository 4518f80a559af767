//! Lead image extraction.
//!
//! Blog pages use the first image of a post body for preview metadata
//! (`og:image` and friends). This scans the same event stream the renderer
//! consumes, without rendering anything.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::util::parser_options;

/// Reference to an image found in a markdown document.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageRef {
    /// Image source URL as authored.
    pub src: String,
    /// Alt text, possibly empty.
    pub alt: String,
}

/// Find the first image in a markdown document.
///
/// Returns `None` for documents without images. Inline HTML `<img>` tags are
/// not considered; only markdown image syntax counts.
#[must_use]
pub fn first_image(markdown: &str) -> Option<ImageRef> {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut pending: Option<String> = None;
    let mut alt = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Image { dest_url, .. }) => {
                pending = Some(dest_url.to_string());
                alt.clear();
            }
            Event::Text(text) if pending.is_some() => alt.push_str(&text),
            Event::End(TagEnd::Image) => {
                if let Some(src) = pending.take() {
                    return Some(ImageRef {
                        src,
                        alt: std::mem::take(&mut alt),
                    });
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_image_found() {
        let image = first_image("intro\n\n![Cover](cover.png)\n\n![Second](b.png)").unwrap();
        assert_eq!(image.src, "cover.png");
        assert_eq!(image.alt, "Cover");
    }

    #[test]
    fn test_first_image_empty_alt() {
        let image = first_image("![](cover.png)").unwrap();
        assert_eq!(image.src, "cover.png");
        assert_eq!(image.alt, "");
    }

    #[test]
    fn test_first_image_none_without_images() {
        assert_eq!(first_image("# Just a heading\n\nAnd text."), None);
    }

    #[test]
    fn test_first_image_ignores_links() {
        assert_eq!(first_image("[not an image](x.png)"), None);
    }
}
