//! Formatting modes as handler tables.
//!
//! Each mode is a `Strategy`: a table of tag handlers plus an optional
//! parent table consulted for tags the mode does not override. `Full` is the
//! complete baseline, `Preview` overrides it, and `QuoteInsidePreview`
//! overrides `Preview`.

use crate::dispatch::{Handler, SpanTag, full, preview, quote};

/// Formatting mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Full fidelity, no truncation.
    #[default]
    Full,
    /// Single-line, length-bounded preview.
    Preview,
    /// Preview of a quoted message nested inside another preview.
    QuoteInsidePreview,
}

impl Mode {
    pub(crate) fn strategy(self) -> &'static Strategy {
        match self {
            Self::Full => &FULL,
            Self::Preview => &PREVIEW,
            Self::QuoteInsidePreview => &QUOTE_INSIDE_PREVIEW,
        }
    }
}

/// Tag handler table with fallback to a parent table.
pub(crate) struct Strategy {
    parent: Option<&'static Strategy>,
    handlers: &'static [(SpanTag, Handler)],
}

impl Strategy {
    /// Handler for `tag`, searching this table first and then its parents.
    pub(crate) fn handler(&self, tag: SpanTag) -> Handler {
        let mut strategy = Some(self);
        while let Some(current) = strategy {
            if let Some((_, handler)) = current.handlers.iter().find(|(t, _)| *t == tag) {
                return *handler;
            }
            strategy = current.parent;
        }
        full::passthrough
    }
}

static FULL: Strategy = Strategy {
    parent: None,
    handlers: &[
        (SpanTag::Plain, full::passthrough),
        (SpanTag::Strong, full::strong),
        (SpanTag::Emphasis, full::emphasis),
        (SpanTag::Deleted, full::deleted),
        (SpanTag::Code, full::code),
        (SpanTag::LineBreak, full::line_break),
        (SpanTag::Link, full::link),
        (SpanTag::Mention, full::passthrough),
        (SpanTag::Hashtag, full::passthrough),
        (SpanTag::Hidden, full::passthrough),
        (SpanTag::Image, full::image),
        (SpanTag::Attachment, full::attachment),
        (SpanTag::Button, full::button),
        (SpanTag::Form, full::form),
        (SpanTag::FormRow, full::passthrough),
        (SpanTag::Quote, full::quote),
        (SpanTag::Unknown, full::unknown),
    ],
};

static PREVIEW: Strategy = Strategy {
    parent: Some(&FULL),
    handlers: &[
        (SpanTag::Hidden, preview::hidden),
        (SpanTag::LineBreak, preview::line_break),
        (SpanTag::Link, preview::link),
        (SpanTag::Image, preview::image),
        (SpanTag::Attachment, preview::attachment),
        (SpanTag::Form, preview::form),
        (SpanTag::FormRow, preview::form_row),
        (SpanTag::Button, preview::button),
        (SpanTag::Quote, preview::quote),
        (SpanTag::Unknown, preview::unknown),
    ],
};

static QUOTE_INSIDE_PREVIEW: Strategy = Strategy {
    parent: Some(&PREVIEW),
    handlers: &[
        (SpanTag::LineBreak, quote::line_break),
        (SpanTag::Image, quote::image),
        (SpanTag::Attachment, quote::attachment),
    ],
};
