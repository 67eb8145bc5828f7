//! Post-order walk over a parsed span tree.

use crate::attrs::Attributes;
use crate::dispatch::{SpanInput, SpanTag, build};
use crate::mode::Mode;
use crate::node::StyledNode;
use crate::options::FormatOptions;
use crate::plain::to_plain;
use crate::render::Renderer;
use crate::text::StyledText;

/// A parsed Drafty span with nested children.
///
/// A span with no tag is a plain container; a span with `text` and no
/// children is a leaf.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub tag: Option<String>,
    pub attributes: Attributes,
    /// Index of the span's entity in the document.
    pub key: Option<usize>,
    pub children: Vec<Span>,
    pub text: Option<String>,
}

impl Span {
    /// Untagged text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Span with `tag` and no content.
    #[must_use]
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    /// Untagged container.
    #[must_use]
    pub fn container(children: Vec<Span>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Span) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Span>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }

    fn span_tag(&self) -> SpanTag {
        SpanTag::parse(self.tag.as_deref())
    }
}

/// Formats span trees with a fixed set of options.
///
/// # Example
///
/// ```
/// use drafty_render::{FormatOptions, Formatter, Span};
///
/// let doc = Span::container(vec![
///     Span::text("Hello, "),
///     Span::tagged("ST").with_text("world"),
/// ]);
/// let formatter = Formatter::new(FormatOptions::preview(8));
/// assert_eq!(formatter.render(&doc).to_string(), "Hello, w…");
/// assert_eq!(formatter.to_plain(&doc), "Hello, world");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Build the styled tree of `span` in the configured mode.
    ///
    /// In full mode, content nested in a quote is built the way a quote
    /// preview shows it.
    #[must_use]
    pub fn format(&self, span: &Span) -> StyledNode {
        self.build(span, self.options.mode)
    }

    /// Format and render. Previews are truncated to the configured
    /// `max_length`; full mode never is.
    #[must_use]
    pub fn render(&self, span: &Span) -> StyledText {
        Renderer::new(&self.options).render(&self.format(span))
    }

    /// Format and project to plain text.
    #[must_use]
    pub fn to_plain(&self, span: &Span) -> String {
        to_plain(&self.format(span))
    }

    fn build(&self, span: &Span, mode: Mode) -> StyledNode {
        let child_mode = match (mode, span.span_tag()) {
            (Mode::Full, SpanTag::Quote) => Mode::QuoteInsidePreview,
            _ => mode,
        };
        let children = span
            .children
            .iter()
            .map(|child| self.build(child, child_mode))
            .collect();

        let mut input =
            SpanInput::new(span.tag.as_deref(), &span.attributes).with_children(children);
        input.text = span.text.as_deref();
        input.key = span.key;
        build(input, mode, &self.options)
    }
}
