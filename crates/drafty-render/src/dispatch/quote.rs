//! Overrides for a quote shown inside another message's preview.
//!
//! Quotes keep their line breaks and name the quoted file.

use crate::dispatch::full::is_json;
use crate::dispatch::preview::annotated_icon;
use crate::dispatch::{Content, SpanContext};
use crate::node::{AttachmentDescriptor, IconKind, StyledNode};
use crate::style::CharStyle;
use crate::util::shorten;

/// File names longer than this are shortened.
const MAX_FILE_NAME: usize = 16;
const FILE_NAME_KEEP: usize = 8;

pub(crate) fn line_break(_: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::leaf("\n")
}

pub(crate) fn image(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    named_icon(ctx, IconKind::Image, &ctx.options.labels.picture)
}

pub(crate) fn attachment(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    if is_json(ctx.attributes) {
        tracing::debug!(key = ?ctx.key, "JSON attachment elided");
        return StyledNode::empty();
    }
    named_icon(ctx, IconKind::Attachment, &ctx.options.labels.attachment)
}

/// Icon and monospace short file name, or the label when unnamed.
fn named_icon(ctx: &SpanContext<'_>, kind: IconKind, label: &str) -> StyledNode {
    match ctx.attributes.str("name").filter(|name| !name.is_empty()) {
        Some(name) => StyledNode::composite(vec![
            StyledNode::attachment(AttachmentDescriptor::Icon(kind)),
            StyledNode::leaf(format!(
                " {}",
                shorten(name, MAX_FILE_NAME, FILE_NAME_KEEP)
            ))
            .with_char_style(CharStyle::monospace()),
        ]),
        None => annotated_icon(kind, label),
    }
}
