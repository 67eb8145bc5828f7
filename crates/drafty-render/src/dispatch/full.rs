//! Full-fidelity handlers. Every tag has one; other modes override a subset.

use crate::attrs::Attributes;
use crate::dispatch::{Content, SpanContext, action_url};
use crate::node::{AttachmentDescriptor, FileAttachment, ImageAttachment, StyledNode};
use crate::style::{CharStyle, FontTraits};

/// Mime type of machine-readable attachments that are never shown.
pub(crate) const JSON_MIME: &str = "application/json";

pub(crate) fn passthrough(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content.into_node()
}

pub(crate) fn strong(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content.into_node().with_traits(FontTraits::BOLD)
}

pub(crate) fn emphasis(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content.into_node().with_traits(FontTraits::ITALIC)
}

pub(crate) fn deleted(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content.into_node().with_char_style(CharStyle::strikethrough())
}

pub(crate) fn code(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    content.into_node().with_char_style(CharStyle::monospace())
}

pub(crate) fn line_break(_: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::leaf("\n")
}

pub(crate) fn link(ctx: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    let node = content.into_node();
    match ctx.attributes.str("url") {
        Some(url) if is_web_url(url) => node.with_char_style(CharStyle::link(url)),
        Some(url) => {
            tracing::debug!(url = %url, "Link target rejected");
            node
        }
        None => node,
    }
}

pub(crate) fn image(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    StyledNode::attachment(AttachmentDescriptor::Image(image_attachment(ctx)))
}

pub(crate) fn attachment(ctx: &SpanContext<'_>, _: Content<'_>) -> StyledNode {
    if is_json(ctx.attributes) {
        tracing::debug!(key = ?ctx.key, "JSON attachment elided");
        return StyledNode::empty();
    }

    let file = file_attachment(ctx);
    if file.bytes.is_none() && file.reference.is_none() {
        tracing::debug!(key = ?ctx.key, "Attachment without payload");
        return StyledNode::attachment(AttachmentDescriptor::Empty);
    }
    StyledNode::attachment(AttachmentDescriptor::File(file))
}

pub(crate) fn button(ctx: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    let face = if content.is_empty() {
        StyledNode::leaf(ctx.options.labels.button.clone())
    } else {
        content.into_node()
    };
    let action_url = action_url(ctx, &face);
    StyledNode::attachment(AttachmentDescriptor::Button { face, action_url })
}

/// Children separated by line breaks, none leading or trailing.
pub(crate) fn form(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    if content.children.is_empty() {
        return content.into_node();
    }

    let mut children = Vec::with_capacity(content.children.len() * 2);
    for (i, child) in content.children.into_iter().enumerate() {
        if i > 0 {
            children.push(StyledNode::leaf("\n"));
        }
        children.push(child);
    }
    StyledNode::composite(children)
}

pub(crate) fn quote(_: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    StyledNode::composite(vec![
        StyledNode::attachment(AttachmentDescriptor::Quote {
            inner: content.into_node(),
        }),
        StyledNode::leaf("\n"),
    ])
}

pub(crate) fn unknown(ctx: &SpanContext<'_>, content: Content<'_>) -> StyledNode {
    tracing::debug!(tag = ?ctx.tag, "Unknown tag passed through");
    content.into_node()
}

/// Whether `url` parses with an `http` or `https` scheme.
pub(crate) fn is_web_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

pub(crate) fn is_json(attrs: &Attributes) -> bool {
    attrs.str("mime") == Some(JSON_MIME)
}

fn non_negative<T: TryFrom<i64>>(attrs: &Attributes, key: &str) -> Option<T> {
    attrs.int(key).and_then(|value| T::try_from(value).ok())
}

pub(crate) fn image_attachment(ctx: &SpanContext<'_>) -> ImageAttachment {
    let attrs = ctx.attributes;
    ImageAttachment {
        bytes: attrs.bytes("val").map(std::borrow::Cow::into_owned),
        reference: attrs.str("ref").map(str::to_owned),
        mime: attrs.str("mime").map(str::to_owned),
        name: attrs.str("name").map(str::to_owned),
        size: non_negative(attrs, "size"),
        width: non_negative(attrs, "width"),
        height: non_negative(attrs, "height"),
        key: ctx.key,
    }
}

pub(crate) fn file_attachment(ctx: &SpanContext<'_>) -> FileAttachment {
    let attrs = ctx.attributes;
    FileAttachment {
        bytes: attrs.bytes("val").map(std::borrow::Cow::into_owned),
        reference: attrs.str("ref").map(str::to_owned),
        mime: attrs.str("mime").map(str::to_owned),
        name: attrs.str("name").map(str::to_owned),
        size: non_negative(attrs, "size"),
        key: ctx.key,
    }
}
