//! Preview overrides: single line, no payloads, no nested quotes.

use crate::dispatch::full::is_json;
use crate::dispatch::{Content, SpanContext};
use crate::node::{AttachmentDescriptor, IconKind, StyledNode};
use crate::plain::to_plain;
use crate::style::{CharStyle, Color};

/// Stock icon followed by `" " + label`.
pub(crate) fn annotated_icon(kind: IconKind, label: &str) -> StyledNode {
    StyledNode::composite(vec![
        StyledNode::attachment(AttachmentDescriptor::Icon(kind)),
        StyledNode::leaf(format!(" {label}")),
    ])
}

pub(crate) fn hidden(_: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::empty()
}

pub(crate) fn line_break(_: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::leaf(" ")
}

/// Tinted like a link, never clickable.
pub(crate) fn link(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content
        .into_node()
        .with_char_style(CharStyle::color(Color::LINK))
}

pub(crate) fn image(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    annotated_icon(IconKind::Image, &ctx.options.labels.picture)
}

pub(crate) fn attachment(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    if is_json(ctx.attributes) {
        tracing::debug!(key = ?ctx.key, "JSON attachment elided");
        return StyledNode::empty();
    }
    annotated_icon(IconKind::Attachment, &ctx.options.labels.attachment)
}

/// Labelled form icon, `": "`, then the children on one line.
pub(crate) fn form(ctx: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    let mut children = vec![
        annotated_icon(IconKind::Form, &ctx.options.labels.form),
        StyledNode::leaf(": "),
    ];
    if content.children.is_empty() {
        children.push(content.into_node());
    } else {
        children.extend(content.children);
    }
    StyledNode::composite(children)
}

pub(crate) fn form_row(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    StyledNode::composite(vec![StyledNode::leaf(" "), content.into_node()])
}

/// Bordered face text without an action.
pub(crate) fn button(ctx: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    let face = to_plain(&content.into_node());
    let face = if face.is_empty() {
        ctx.options.labels.button.clone()
    } else {
        face
    };
    StyledNode::leaf(face).with_char_style(CharStyle {
        border: true,
        baseline_offset: Some(0.0),
        ..CharStyle::default()
    })
}

pub(crate) fn quote(_: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::empty()
}

pub(crate) fn unknown(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    tracing::debug!(tag = ?ctx.tag, "Unknown tag shown as icon");
    annotated_icon(IconKind::Unknown, &ctx.options.labels.unsupported)
}
