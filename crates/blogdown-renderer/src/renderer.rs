//! Event-stream markdown renderer with pluggable backend.

use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::postprocess::PostProcess;
use crate::state::{
    CodeBlockState, HeadingState, ImageState, ParagraphState, TableState, TocEntry, escape_html,
};
use crate::util::{fence_language, heading_level_to_num, parser_options};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Table of contents entries, one per heading, in document order.
    pub toc: Vec<TocEntry>,
    /// Warnings generated during conversion (e.g., highlight fallbacks).
    pub warnings: Vec<String>,
}

/// Markdown renderer generic over a [`RenderBackend`].
///
/// Drives a [`pulldown_cmark`] event stream and assembles one HTML string.
/// Rendering is total: optional fields are defaulted, unstyled constructs
/// use the backend's default rules, and per-block failures degrade to
/// warnings instead of errors.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    paragraph: ParagraphState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    warnings: Vec<String>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            paragraph: ParagraphState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            warnings: Vec::new(),
            _backend: PhantomData,
        }
    }

    /// Parser options used for every conversion (tables, strikethrough,
    /// task lists).
    #[must_use]
    pub fn parser_options(&self) -> Options {
        parser_options()
    }

    /// Convert markdown text to HTML.
    ///
    /// Applies the [`PostProcess`] pass between parsing and rendering; this
    /// is the full pipeline a caller normally wants.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(PostProcess::new(parser))
    }

    /// Render a prepared event stream.
    ///
    /// The stream is rendered as-is; callers feeding raw parser events are
    /// responsible for applying [`PostProcess`] themselves.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            toc: self.heading.take_toc(),
            warnings: std::mem::take(&mut self.warnings),
        }
    }

    /// Push inline content to the buffer the current context collects into.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else if self.paragraph.is_active() {
            self.paragraph.push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    /// Render a fragment through a backend writer and route it inline.
    fn push_fragment(&mut self, write: impl FnOnce(&mut String)) {
        let mut fragment = String::new();
        write(&mut fragment);
        self.push_inline(&fragment);
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.push_fragment(B::hard_break),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled by the parser options.
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    self.paragraph.start();
                }
            }
            Tag::Heading { level, .. } => {
                // Opening markup is written in end_tag once the text is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(_) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => B::list_start(start, &mut self.output),
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::table_start(&mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead>");
                B::table_row_start(&mut self.output);
            }
            Tag::TableRow => {
                self.table.start_row();
                B::table_row_start(&mut self.output);
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                B::table_cell_start(self.table.is_in_head(), align, &mut self.output);
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                self.push_fragment(|out| B::link_start(&dest_url, &title, out));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Collect alt text; the image is rendered in end_tag.
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    let body = self.paragraph.end();
                    B::paragraph(&body, &mut self.output);
                }
            }
            TagEnd::Heading(_level) => {
                if let Some((level, text, html)) = self.heading.complete_heading() {
                    B::heading(level, &text, &html, &mut self.output);
                }
            }
            TagEnd::BlockQuote(_) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                if let Some(warning) = B::code_block(lang.as_deref(), &content, &mut self.output) {
                    self.warnings.push(warning);
                }
            }
            TagEnd::List(ordered) => B::list_end(ordered, &mut self.output),
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    self.push_fragment(|out| B::image(&src, &alt, &title, out));
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                B::table_cell_end(self.table.is_in_head(), &mut self.output);
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Link => self.push_fragment(B::link_end),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            let escaped = escape_html(text);
            self.push_inline(&escaped);
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_fragment(|out| B::inline_code(code, out));
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_newline();
        } else {
            self.push_inline("\n");
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
