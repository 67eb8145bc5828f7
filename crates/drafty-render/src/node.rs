//! Immutable intermediate render tree.
//!
//! A [`StyledNode`] tree is built bottom-up, one node per span, and is never
//! mutated after construction. It is consumed by the renderer and by the
//! plain-text projector.

use crate::style::{CharStyle, FontTraits, ParagraphStyle};

/// Content of a [`StyledNode`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeContent {
    /// Uniformly styled text.
    Leaf(String),
    /// Ordered children.
    Composite(Vec<StyledNode>),
    /// A single non-text unit.
    Attachment(Box<AttachmentDescriptor>),
}

/// A node of the styled tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledNode {
    pub content: NodeContent,
    /// Added over the node's entire rendered range.
    pub char_style: Option<CharStyle>,
    /// Unioned with inherited traits and applied to leaves.
    pub font_traits: FontTraits,
    pub paragraph_style: Option<ParagraphStyle>,
}

impl StyledNode {
    fn with_content(content: NodeContent) -> Self {
        Self {
            content,
            char_style: None,
            font_traits: FontTraits::empty(),
            paragraph_style: None,
        }
    }

    /// Unstyled leaf.
    #[must_use]
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::with_content(NodeContent::Leaf(text.into()))
    }

    /// Zero-length leaf.
    #[must_use]
    pub fn empty() -> Self {
        Self::leaf(String::new())
    }

    /// Unstyled node over `children`.
    #[must_use]
    pub fn composite(children: Vec<StyledNode>) -> Self {
        Self::with_content(NodeContent::Composite(children))
    }

    #[must_use]
    pub fn attachment(descriptor: AttachmentDescriptor) -> Self {
        Self::with_content(NodeContent::Attachment(Box::new(descriptor)))
    }

    /// Add `traits` to the node's own trait set.
    #[must_use]
    pub fn with_traits(mut self, traits: FontTraits) -> Self {
        self.font_traits |= traits;
        self
    }

    /// Add `style` over any character style the node already has.
    #[must_use]
    pub fn with_char_style(mut self, style: CharStyle) -> Self {
        if let Some(existing) = self.char_style.as_mut() {
            existing.add(&style);
        } else {
            self.char_style = Some(style);
        }
        self
    }

    #[must_use]
    pub fn with_paragraph_style(mut self, style: ParagraphStyle) -> Self {
        self.paragraph_style = Some(style);
        self
    }

    /// Contribution of this node to the rendered length.
    ///
    /// Leaves count characters, attachments count as one unit and composites
    /// sum their children.
    #[must_use]
    pub fn length(&self) -> usize {
        match &self.content {
            NodeContent::Leaf(text) => text.chars().count(),
            NodeContent::Composite(children) => children.iter().map(Self::length).sum(),
            NodeContent::Attachment(_) => 1,
        }
    }

    /// Leaf text, if this is a leaf.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Leaf(text) => Some(text),
            _ => None,
        }
    }

    /// Children, if this is a composite.
    #[must_use]
    pub fn children(&self) -> Option<&[StyledNode]> {
        match &self.content {
            NodeContent::Composite(children) => Some(children),
            _ => None,
        }
    }

    /// Attachment descriptor, if this is an attachment.
    #[must_use]
    pub fn descriptor(&self) -> Option<&AttachmentDescriptor> {
        match &self.content {
            NodeContent::Attachment(descriptor) => Some(descriptor),
            _ => None,
        }
    }
}

/// Inline image.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageAttachment {
    /// Inline image bytes.
    pub bytes: Option<Vec<u8>>,
    /// Pointer to remotely stored bytes.
    pub reference: Option<String>,
    pub mime: Option<String>,
    pub name: Option<String>,
    /// Size of the image payload in bytes.
    pub size: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Index of the entity in the source document.
    pub key: Option<usize>,
}

/// Generic file attachment.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileAttachment {
    pub bytes: Option<Vec<u8>>,
    pub reference: Option<String>,
    pub mime: Option<String>,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub key: Option<usize>,
}

/// Stock icons used by previews.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IconKind {
    Image,
    Attachment,
    Form,
    Unknown,
}

/// What an attachment node stands for.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachmentDescriptor {
    Image(ImageAttachment),
    File(FileAttachment),
    Button {
        face: StyledNode,
        action_url: Option<String>,
    },
    Quote {
        inner: StyledNode,
    },
    /// Stock icon.
    Icon(IconKind),
    /// Broken or placeholder attachment with no payload.
    Empty,
}
