//! Plain-text projection for clipboard, accessibility and notifications.

use crate::node::{AttachmentDescriptor, NodeContent, StyledNode};
use crate::util::shorten;

const UNNAMED: &str = "unnamed";
const MAX_FILE_NAME: usize = 32;
const FILE_NAME_KEEP: usize = 14;

/// Project `node` to a plain string.
///
/// Attachments collapse to short bracketed tags such as `[img cat.png]`.
///
/// ```
/// use drafty_render::{AttachmentDescriptor, StyledNode, to_plain};
///
/// let node = StyledNode::composite(vec![
///     StyledNode::leaf("see "),
///     StyledNode::attachment(AttachmentDescriptor::Empty),
/// ]);
/// assert_eq!(to_plain(&node), "see [att unnamed]");
/// ```
#[must_use]
pub fn to_plain(node: &StyledNode) -> String {
    let mut out = String::new();
    write_plain(node, &mut out);
    out
}

fn write_plain(node: &StyledNode, out: &mut String) {
    match &node.content {
        NodeContent::Leaf(text) => out.push_str(text),
        NodeContent::Composite(children) => {
            for child in children {
                write_plain(child, out);
            }
        }
        NodeContent::Attachment(descriptor) => write_attachment(descriptor, out),
    }
}

fn write_attachment(descriptor: &AttachmentDescriptor, out: &mut String) {
    match descriptor {
        AttachmentDescriptor::Image(image) => {
            out.push_str("[img ");
            out.push_str(image.name.as_deref().unwrap_or(UNNAMED));
            out.push(']');
        }
        AttachmentDescriptor::File(file) => {
            write_file(file.name.as_deref(), out);
        }
        AttachmentDescriptor::Empty => write_file(None, out),
        AttachmentDescriptor::Button { face, .. } => write_tagged("btn", face, out),
        AttachmentDescriptor::Quote { inner } => write_tagged("quote", inner, out),
        AttachmentDescriptor::Icon(_) => {}
    }
}

fn write_file(name: Option<&str>, out: &mut String) {
    out.push_str("[att ");
    match name {
        Some(name) => out.push_str(&shorten(name, MAX_FILE_NAME, FILE_NAME_KEEP)),
        None => out.push_str(UNNAMED),
    }
    out.push(']');
}

fn write_tagged(tag: &str, inner: &StyledNode, out: &mut String) {
    let text = to_plain(inner);
    out.push('[');
    out.push_str(tag);
    if !text.is_empty() {
        out.push(' ');
        out.push_str(&text);
    }
    out.push(']');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FileAttachment, IconKind, ImageAttachment};
    use crate::style::FontTraits;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_ignores_styles() {
        let node = StyledNode::composite(vec![
            StyledNode::leaf("a").with_traits(FontTraits::BOLD),
            StyledNode::leaf("b"),
        ]);
        assert_eq!(to_plain(&node), "ab");
    }

    #[test]
    fn test_image_names() {
        let named = StyledNode::attachment(AttachmentDescriptor::Image(ImageAttachment {
            name: Some("cat.png".to_owned()),
            ..ImageAttachment::default()
        }));
        let unnamed =
            StyledNode::attachment(AttachmentDescriptor::Image(ImageAttachment::default()));
        assert_eq!(to_plain(&named), "[img cat.png]");
        assert_eq!(to_plain(&unnamed), "[img unnamed]");
    }

    #[test]
    fn test_long_file_name_is_shortened() {
        let node = StyledNode::attachment(AttachmentDescriptor::File(FileAttachment {
            name: Some("abcdefghijklmnopqrstuvwxyz0123456789.txt".to_owned()),
            ..FileAttachment::default()
        }));
        assert_eq!(to_plain(&node), "[att abcdefghijklmn…0123456789.txt]");
    }

    #[test]
    fn test_button_and_quote() {
        let button = StyledNode::attachment(AttachmentDescriptor::Button {
            face: StyledNode::leaf("Yes"),
            action_url: None,
        });
        let empty_quote = StyledNode::attachment(AttachmentDescriptor::Quote {
            inner: StyledNode::empty(),
        });
        assert_eq!(to_plain(&button), "[btn Yes]");
        assert_eq!(to_plain(&empty_quote), "[quote]");
    }

    #[test]
    fn test_icon_projects_to_nothing() {
        let node = StyledNode::composite(vec![
            StyledNode::attachment(AttachmentDescriptor::Icon(IconKind::Image)),
            StyledNode::leaf(" Picture"),
        ]);
        assert_eq!(to_plain(&node), " Picture");
    }
}
