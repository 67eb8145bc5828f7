//! Span type dispatcher.
//!
//! [`build`] turns one span, whose children are already built, into a
//! [`StyledNode`]. The handler is picked from the table of the requested
//! [`Mode`]; building never fails and unrecognized input degrades to a
//! pass-through or placeholder node.

mod button;
pub(crate) mod full;
pub(crate) mod preview;
pub(crate) mod quote;

use crate::attrs::Attributes;
use crate::mode::Mode;
use crate::node::StyledNode;
use crate::options::FormatOptions;

pub(crate) use button::action_url;

/// Recognized span tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpanTag {
    /// Untagged container.
    Plain,
    /// `ST`
    Strong,
    /// `EM`
    Emphasis,
    /// `DL`
    Deleted,
    /// `CO`
    Code,
    /// `BR`
    LineBreak,
    /// `LN`
    Link,
    /// `MN`
    Mention,
    /// `HT`
    Hashtag,
    /// `HD`
    Hidden,
    /// `IM`
    Image,
    /// `EX`
    Attachment,
    /// `BN`
    Button,
    /// `FM`
    Form,
    /// `RW`
    FormRow,
    /// `QQ`
    Quote,
    /// Any other tag.
    Unknown,
}

impl SpanTag {
    pub const ALL: [Self; 17] = [
        Self::Plain,
        Self::Strong,
        Self::Emphasis,
        Self::Deleted,
        Self::Code,
        Self::LineBreak,
        Self::Link,
        Self::Mention,
        Self::Hashtag,
        Self::Hidden,
        Self::Image,
        Self::Attachment,
        Self::Button,
        Self::Form,
        Self::FormRow,
        Self::Quote,
        Self::Unknown,
    ];

    /// Classify a raw tag. `None` is an untagged container.
    ///
    /// ```
    /// use drafty_render::SpanTag;
    ///
    /// assert_eq!(SpanTag::parse(Some("ST")), SpanTag::Strong);
    /// assert_eq!(SpanTag::parse(Some("XX")), SpanTag::Unknown);
    /// assert_eq!(SpanTag::parse(None), SpanTag::Plain);
    /// ```
    #[must_use]
    pub fn parse(tag: Option<&str>) -> Self {
        let Some(tag) = tag else {
            return Self::Plain;
        };
        match tag {
            "ST" => Self::Strong,
            "EM" => Self::Emphasis,
            "DL" => Self::Deleted,
            "CO" => Self::Code,
            "BR" => Self::LineBreak,
            "LN" => Self::Link,
            "MN" => Self::Mention,
            "HT" => Self::Hashtag,
            "HD" => Self::Hidden,
            "IM" => Self::Image,
            "EX" => Self::Attachment,
            "BN" => Self::Button,
            "FM" => Self::Form,
            "RW" => Self::FormRow,
            "QQ" => Self::Quote,
            _ => Self::Unknown,
        }
    }

    /// Two-letter wire code, if the tag has one.
    #[must_use]
    pub fn code(self) -> Option<&'static str> {
        Some(match self {
            Self::Strong => "ST",
            Self::Emphasis => "EM",
            Self::Deleted => "DL",
            Self::Code => "CO",
            Self::LineBreak => "BR",
            Self::Link => "LN",
            Self::Mention => "MN",
            Self::Hashtag => "HT",
            Self::Hidden => "HD",
            Self::Image => "IM",
            Self::Attachment => "EX",
            Self::Button => "BN",
            Self::Form => "FM",
            Self::FormRow => "RW",
            Self::Quote => "QQ",
            Self::Plain | Self::Unknown => return None,
        })
    }
}

/// One span handed to the dispatcher, children already built.
#[derive(Clone, Debug)]
pub struct SpanInput<'a> {
    pub tag: Option<&'a str>,
    pub attributes: &'a Attributes,
    /// Index of the span's entity in the document.
    pub key: Option<usize>,
    pub children: Vec<StyledNode>,
    pub text: Option<&'a str>,
}

impl<'a> SpanInput<'a> {
    #[must_use]
    pub fn new(tag: Option<&'a str>, attributes: &'a Attributes) -> Self {
        Self {
            tag,
            attributes,
            key: None,
            children: Vec::new(),
            text: None,
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<StyledNode>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &'a str) -> Self {
        self.text = Some(text);
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }
}

/// What a handler knows about the span besides its content.
pub(crate) struct SpanContext<'a> {
    pub(crate) tag: Option<&'a str>,
    pub(crate) attributes: &'a Attributes,
    pub(crate) key: Option<usize>,
    pub(crate) options: &'a FormatOptions,
}

/// Built children or leaf text of a span.
pub(crate) struct Content<'a> {
    pub(crate) children: Vec<StyledNode>,
    pub(crate) text: Option<&'a str>,
}

impl Content<'_> {
    pub(crate) fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none_or(str::is_empty)
    }

    /// Children as a composite, otherwise the text as a leaf.
    pub(crate) fn into_node(self) -> StyledNode {
        if self.children.is_empty() {
            StyledNode::leaf(self.text.unwrap_or_default())
        } else {
            StyledNode::composite(self.children)
        }
    }
}

pub(crate) type Handler = fn(&SpanContext<'_>, Content<'_>) -> StyledNode;

/// Build the node for one span using the handler table of `mode`.
///
/// # Example
///
/// ```
/// use drafty_render::{Attributes, FontTraits, FormatOptions, Mode, SpanInput, build};
///
/// let attrs = Attributes::new();
/// let options = FormatOptions::default();
/// let inner = build(SpanInput::new(Some("EM"), &attrs).with_text("hi"), Mode::Full, &options);
/// let outer = build(
///     SpanInput::new(Some("ST"), &attrs).with_children(vec![inner]),
///     Mode::Full,
///     &options,
/// );
/// assert_eq!(outer.font_traits, FontTraits::BOLD);
/// ```
#[must_use]
pub fn build(span: SpanInput<'_>, mode: Mode, options: &FormatOptions) -> StyledNode {
    let tag = SpanTag::parse(span.tag);
    let handler = mode.strategy().handler(tag);
    let context = SpanContext {
        tag: span.tag,
        attributes: span.attributes,
        key: span.key,
        options,
    };
    handler(
        &context,
        Content {
            children: span.children,
            text: span.text,
        },
    )
}
