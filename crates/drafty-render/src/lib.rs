//! Drafty rich-text formatter.
//!
//! Converts a parsed Drafty span tree into styled output in one of three
//! modes, plus a plain-text projection.
//!
//! # Architecture
//!
//! - [`build`] dispatches one span, children already built, to a tag handler
//!   and returns a [`StyledNode`]. Handlers come from per-[`Mode`] tables:
//!   `Preview` overrides `Full`, `QuoteInsidePreview` overrides `Preview`.
//! - [`Renderer`] flattens a node tree into [`StyledText`], composing font
//!   traits downwards and truncating to a character budget.
//! - [`to_plain`] projects a node tree to a string.
//! - [`Formatter`] walks a [`Span`] tree post-order and drives the above.
//!
//! Every operation is pure and synchronous. Malformed input degrades to
//! unstyled text or placeholders, never to an error.
//!
//! # Example
//!
//! ```
//! use drafty_render::{Attributes, FormatOptions, Formatter, Span};
//!
//! let doc = Span::container(vec![
//!     Span::tagged("ST").with_text("Note: "),
//!     Span::tagged("LN")
//!         .with_attributes(Attributes::new().with("url", "https://example.com"))
//!         .with_text("details"),
//! ]);
//!
//! let full = Formatter::new(FormatOptions::default()).render(&doc);
//! assert_eq!(full.to_string(), "Note: details");
//!
//! let preview = Formatter::new(FormatOptions::preview(4)).render(&doc);
//! assert_eq!(preview.to_string(), "Note…");
//! ```

mod attrs;
mod dispatch;
mod mode;
mod node;
mod options;
mod plain;
mod render;
mod style;
mod text;
mod util;
mod walk;

pub use attrs::{AttrValue, Attributes};
pub use dispatch::{SpanInput, SpanTag, build};
pub use mode::Mode;
pub use node::{
    AttachmentDescriptor, FileAttachment, IconKind, ImageAttachment, NodeContent, StyledNode,
};
pub use options::{ActionEndpoint, FormatOptions, Labels, Size};
pub use plain::to_plain;
pub use render::{ELLIPSIS, Rendered, Renderer, render_full, render_preview};
pub use style::{BaseStyle, CharStyle, Color, FontTraits, ParagraphStyle, RunStyle};
pub use text::{
    FileBlock, ImagePlaceholder, OBJECT_REPLACEMENT, RenderedImage, RenderedObject, Run,
    RunContent, StyledText,
};
pub use util::{human_size, mime_description, shorten, size_under};
pub use walk::{Formatter, Span};
