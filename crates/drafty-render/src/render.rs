//! Renderer with budgeted truncation.
//!
//! Rendering walks a [`StyledNode`] tree depth first. Font traits accumulate
//! from ancestors and land on leaves; a node's character and paragraph styles
//! are added over everything the node emitted, after its content.
//!
//! # Truncation
//!
//! Every call receives the remaining character budget and returns whether it
//! ran out ([`Rendered::truncated`]). A leaf emits as much of its text as
//! fits. An attachment takes one unit, or reports truncation straight away
//! when nothing is left. A composite stops at the first truncated child and
//! keeps that child's partial output. Only the root turns the signal into a
//! trailing ellipsis.

use crate::mode::Mode;
use crate::node::{
    AttachmentDescriptor, FileAttachment, ImageAttachment, NodeContent, StyledNode,
};
use crate::options::{FormatOptions, Size};
use crate::style::{Color, FontTraits, RunStyle};
use crate::text::{FileBlock, ImagePlaceholder, RenderedImage, RenderedObject, StyledText};
use crate::util::{append_query, human_size, mime_description, shorten, size_under};

/// Appended to truncated output.
pub const ELLIPSIS: &str = "…";

/// Assumed size of images that do not declare one.
const DEFAULT_BITMAP_SIZE: f32 = 256.0;
/// Approximate width of a file name character, in points.
const FILE_NAME_CHAR_WIDTH: f32 = 11.0;
const DEFAULT_FILE_NAME: &str = "file_attachment";
const DEFAULT_MIME: &str = "application/octet-stream";
/// Alpha factor of quoted text.
const QUOTE_ALPHA: f32 = 0.7;

/// Output of one recursive render step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rendered {
    pub text: StyledText,
    /// The budget ran out inside this subtree.
    pub truncated: bool,
}

/// Renders styled node trees with a fixed set of options.
pub struct Renderer<'a> {
    options: &'a FormatOptions,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(options: &'a FormatOptions) -> Self {
        Self { options }
    }

    /// Render `node`, truncating to `options.max_length` when set.
    ///
    /// Full mode is never truncated; `max_length` only bounds previews.
    #[must_use]
    pub fn render(&self, node: &StyledNode) -> StyledText {
        match (self.options.mode, self.options.max_length) {
            (Mode::Preview | Mode::QuoteInsidePreview, Some(max_length)) => {
                self.render_bounded(node, max_length)
            }
            _ => self.render_node(node, FontTraits::empty(), usize::MAX).text,
        }
    }

    /// Render at most `max_length` characters, then an ellipsis if anything
    /// was cut.
    #[must_use]
    pub fn render_bounded(&self, node: &StyledNode, max_length: usize) -> StyledText {
        let Rendered {
            mut text,
            truncated,
        } = self.render_node(node, FontTraits::empty(), max_length);
        if truncated {
            tracing::trace!(max_length, "Ellipsis appended");
            text.push_text(ELLIPSIS, self.plain_style(FontTraits::empty()));
        }
        text
    }

    /// One recursive step: render `node` under `inherited` traits with
    /// `budget` characters left. `usize::MAX` is unbounded.
    #[must_use]
    pub fn render_node(
        &self,
        node: &StyledNode,
        inherited: FontTraits,
        budget: usize,
    ) -> Rendered {
        let traits = inherited | node.font_traits;
        let mut rendered = match &node.content {
            NodeContent::Leaf(text) => self.leaf(text, traits, budget),
            NodeContent::Composite(children) => self.composite(children, traits, budget),
            NodeContent::Attachment(descriptor) => {
                if budget == 0 {
                    tracing::trace!("Attachment truncated");
                    Rendered {
                        text: StyledText::new(),
                        truncated: true,
                    }
                } else {
                    let mut text = StyledText::new();
                    text.push_object(
                        self.materialize(descriptor, traits),
                        self.plain_style(traits),
                    );
                    Rendered {
                        text,
                        truncated: false,
                    }
                }
            }
        };

        if let Some(style) = &node.char_style {
            rendered.text.restyle(|run| run.chars.add(style));
        }
        if let Some(paragraph) = node.paragraph_style {
            rendered.text.restyle(|run| run.paragraph = Some(paragraph));
        }
        rendered
    }

    fn plain_style(&self, traits: FontTraits) -> RunStyle {
        RunStyle::new(&self.options.default_style, traits)
    }

    fn leaf(&self, text: &str, traits: FontTraits, budget: usize) -> Rendered {
        let (emitted, truncated) = match text.char_indices().nth(budget) {
            Some((end, _)) => (&text[..end], true),
            None => (text, false),
        };
        if truncated {
            tracing::trace!(budget, "Leaf truncated");
        }

        let mut out = StyledText::new();
        out.push_text(emitted, self.plain_style(traits));
        Rendered {
            text: out,
            truncated,
        }
    }

    fn composite(&self, children: &[StyledNode], traits: FontTraits, budget: usize) -> Rendered {
        let mut out = StyledText::new();
        let mut remaining = budget;
        for child in children {
            let rendered = self.render_node(child, traits, remaining);
            remaining = remaining.saturating_sub(rendered.text.char_len());
            out.append(rendered.text);
            if rendered.truncated {
                return Rendered {
                    text: out,
                    truncated: true,
                };
            }
        }
        Rendered {
            text: out,
            truncated: false,
        }
    }

    fn materialize(
        &self,
        descriptor: &AttachmentDescriptor,
        traits: FontTraits,
    ) -> RenderedObject {
        match descriptor {
            AttachmentDescriptor::Image(image) => RenderedObject::Image(self.image(image)),
            AttachmentDescriptor::File(file) => RenderedObject::File(self.file_block(Some(file))),
            AttachmentDescriptor::Empty => RenderedObject::File(self.file_block(None)),
            AttachmentDescriptor::Button { face, action_url } => RenderedObject::Button {
                face: self.nested(face, traits, Color::LINK),
                action_url: action_url.clone(),
            },
            AttachmentDescriptor::Quote { inner } => RenderedObject::Quote {
                inner: self.nested(
                    inner,
                    traits,
                    self.options.default_style.color.with_alpha_scaled(QUOTE_ALPHA),
                ),
            },
            AttachmentDescriptor::Icon(kind) => {
                let side = self.options.default_style.font_size;
                RenderedObject::Icon {
                    kind: *kind,
                    size: Size::new(side, side),
                }
            }
        }
    }

    /// Unbounded render of a button face or quote body, tinted with `color`
    /// wherever no color is set.
    fn nested(&self, node: &StyledNode, traits: FontTraits, color: Color) -> StyledText {
        let mut text = self.render_node(node, traits, usize::MAX).text;
        text.restyle(|run| {
            run.chars.text_color.get_or_insert(color);
        });
        text
    }

    #[allow(clippy::cast_precision_loss)]
    fn image(&self, image: &ImageAttachment) -> RenderedImage {
        let original = match (image.width, image.height) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                Size::new(width as f32, height as f32)
            }
            _ => Size::new(DEFAULT_BITMAP_SIZE, DEFAULT_BITMAP_SIZE),
        };
        let placeholder = if image.bytes.is_some() {
            None
        } else if image.reference.is_some() {
            Some(ImagePlaceholder::Loading)
        } else {
            Some(ImagePlaceholder::Broken)
        };

        RenderedImage {
            size: size_under(original, self.options.fit_size),
            bytes: image.bytes.clone(),
            reference: image.reference.clone(),
            mime: image.mime.clone(),
            name: image.name.clone(),
            placeholder,
            key: image.key,
        }
    }

    fn file_block(&self, file: Option<&FileAttachment>) -> FileBlock {
        let valid = file.is_some_and(|f| f.bytes.is_some() || f.reference.is_some());
        let file_name = file
            .and_then(|f| f.name.clone())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned());
        let key = file.and_then(|f| f.key);

        let mime = file.and_then(|f| f.mime.as_deref()).unwrap_or(DEFAULT_MIME);
        let mut description = mime_description(mime)
            .map_or_else(|| self.options.labels.unknown_type.clone(), str::to_owned);
        if let Some(size) = file.and_then(|f| f.size) {
            description.push_str(" · ");
            description.push_str(&human_size(size));
        }

        let download_url = valid.then(|| {
            let remote = file.is_some_and(|f| f.reference.is_some());
            let path = if remote {
                "/attachment/large"
            } else {
                "/attachment/small"
            };
            let key = key.map(|k| k.to_string());
            let mut params = vec![("filename", file_name.as_str())];
            if let Some(key) = &key {
                params.push(("key", key));
            }
            append_query(&self.options.actions.url(path), &params)
        });

        FileBlock {
            valid,
            display_name: self.fit_file_name(&file_name),
            file_name,
            description,
            download_url,
            key,
        }
    }

    /// Shorten `name` so it fits on one line of the fit box.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fit_file_name(&self, name: &str) -> String {
        let max_len = (self.options.fit_size.width / FILE_NAME_CHAR_WIDTH).max(0.0) as usize;
        shorten(name, max_len, max_len.saturating_sub(3) / 2)
    }
}

/// Render without any budget.
#[must_use]
pub fn render_full(node: &StyledNode, options: &FormatOptions) -> StyledText {
    Renderer::new(options)
        .render_node(node, FontTraits::empty(), usize::MAX)
        .text
}

/// Render at most `max_length` characters plus an ellipsis when cut.
///
/// ```
/// use drafty_render::{FormatOptions, StyledNode, render_preview};
///
/// let text = render_preview(&StyledNode::leaf("hello"), &FormatOptions::default(), 3);
/// assert_eq!(text.to_string(), "hel…");
/// ```
#[must_use]
pub fn render_preview(
    node: &StyledNode,
    options: &FormatOptions,
    max_length: usize,
) -> StyledText {
    Renderer::new(options).render_bounded(node, max_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BaseStyle, CharStyle, ParagraphStyle};
    use pretty_assertions::assert_eq;

    fn preview(node: &StyledNode, max_length: usize) -> StyledText {
        render_preview(node, &FormatOptions::default(), max_length)
    }

    fn full(node: &StyledNode) -> StyledText {
        render_full(node, &FormatOptions::default())
    }

    fn image(width: Option<u32>, height: Option<u32>) -> StyledNode {
        StyledNode::attachment(AttachmentDescriptor::Image(ImageAttachment {
            width,
            height,
            ..ImageAttachment::default()
        }))
    }

    fn object(text: &StyledText, index: usize) -> &RenderedObject {
        text.runs()[index].object().unwrap()
    }

    #[test]
    fn test_plain_text_identity() {
        let text = full(&StyledNode::leaf("just text"));
        assert_eq!(text.to_string(), "just text");
        assert_eq!(text.runs().len(), 1);
        assert!(text.runs()[0].style.is_plain());
    }

    #[test]
    fn test_truncation_example() {
        let text = preview(&StyledNode::leaf("hello"), 3);
        assert_eq!(text.to_string(), "hel…");
        assert_eq!(text.char_len(), 4);
    }

    #[test]
    fn test_exact_fit_has_no_ellipsis() {
        assert_eq!(preview(&StyledNode::leaf("hello"), 5).to_string(), "hello");
    }

    #[test]
    fn test_preview_bound() {
        let node = StyledNode::composite(vec![
            StyledNode::leaf("ab").with_traits(FontTraits::BOLD),
            StyledNode::composite(vec![StyledNode::leaf("cdé"), StyledNode::empty()]),
            image(None, None),
            StyledNode::leaf("fgh"),
        ]);
        let total = full(&node).char_len();
        assert_eq!(total, 9);

        for max_length in 0..=12 {
            let len = preview(&node, max_length).char_len();
            if total > max_length {
                assert_eq!(len, max_length + 1, "max_length {max_length}");
            } else {
                assert_eq!(len, total, "max_length {max_length}");
            }
        }
    }

    #[test]
    fn test_traits_union_at_leaves() {
        let bold_italic =
            StyledNode::composite(vec![StyledNode::leaf("hi").with_traits(FontTraits::ITALIC)])
                .with_traits(FontTraits::BOLD);
        let italic_bold =
            StyledNode::composite(vec![StyledNode::leaf("hi").with_traits(FontTraits::BOLD)])
                .with_traits(FontTraits::ITALIC);

        let a = full(&bold_italic);
        let b = full(&italic_bold);
        assert_eq!(a.runs()[0].style.traits, FontTraits::BOLD | FontTraits::ITALIC);
        assert_eq!(a, b);
    }

    #[test]
    fn test_link_keeps_italic() {
        let node =
            StyledNode::composite(vec![StyledNode::leaf("site").with_traits(FontTraits::ITALIC)])
                .with_char_style(CharStyle::link("https://example.com"));
        let text = full(&node);
        let style = &text.runs()[0].style;
        assert_eq!(style.traits, FontTraits::ITALIC);
        assert_eq!(style.chars.link_target.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_parent_style_does_not_clear_child_style() {
        let node = StyledNode::composite(vec![
            StyledNode::leaf("a").with_char_style(CharStyle::link("https://example.com")),
            StyledNode::leaf("b"),
        ])
        .with_char_style(CharStyle::strikethrough());
        let text = full(&node);
        assert_eq!(text.runs().len(), 2);
        assert!(text.runs().iter().all(|run| run.style.chars.strikethrough));
        assert_eq!(
            text.runs()[0].style.chars.link_target.as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_truncated_composite_styles_partial_tail() {
        let node = StyledNode::composite(vec![
            StyledNode::leaf("ab"),
            StyledNode::leaf("cd").with_traits(FontTraits::BOLD),
            StyledNode::leaf("ef"),
        ])
        .with_char_style(CharStyle::monospace());
        let text = preview(&node, 3);

        assert_eq!(text.to_string(), "abc…");
        assert!(text.runs()[0].style.chars.monospace);
        assert!(text.runs()[1].style.chars.monospace);
        assert_eq!(text.runs()[1].style.traits, FontTraits::BOLD);
        assert!(!text.runs()[2].style.chars.monospace);
    }

    #[test]
    fn test_attachment_with_no_budget_truncates() {
        let node = StyledNode::composite(vec![StyledNode::leaf("abc"), image(None, None)]);
        let text = preview(&node, 3);
        assert_eq!(text.to_string(), "abc…");
    }

    #[test]
    fn test_attachment_counts_one() {
        let node = StyledNode::composite(vec![image(None, None), StyledNode::leaf("xy")]);
        let text = preview(&node, 2);
        assert_eq!(text.to_string(), "\u{FFFC}x…");
    }

    #[test]
    fn test_full_render_ignores_budget() {
        let options = FormatOptions::default().with_max_length(2);
        assert_eq!(options.mode, Mode::Full);
        let text = render_full(&StyledNode::leaf("hello"), &options);
        assert_eq!(text.to_string(), "hello");
        assert_eq!(
            Renderer::new(&options)
                .render(&StyledNode::leaf("hello"))
                .to_string(),
            "hello"
        );
    }

    #[test]
    fn test_render_bounds_preview_modes() {
        for mode in [Mode::Preview, Mode::QuoteInsidePreview] {
            let options = FormatOptions::default().with_mode(mode).with_max_length(2);
            assert_eq!(
                Renderer::new(&options)
                    .render(&StyledNode::leaf("hello"))
                    .to_string(),
                "he…",
                "{mode:?}"
            );
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let node = StyledNode::composite(vec![
            StyledNode::leaf("a").with_traits(FontTraits::BOLD),
            image(Some(10), Some(20)),
        ]);
        assert_eq!(full(&node), full(&node));
        assert_eq!(preview(&node, 1), preview(&node, 1));
    }

    #[test]
    fn test_image_scaled_to_fit() {
        let text = full(&image(Some(600), Some(300)));
        let RenderedObject::Image(rendered) = object(&text, 0) else {
            panic!("expected image");
        };
        assert_eq!(rendered.size, Size::new(300.0, 150.0));
        assert_eq!(rendered.placeholder, Some(ImagePlaceholder::Broken));
    }

    #[test]
    fn test_image_default_size_and_loading() {
        let node = StyledNode::attachment(AttachmentDescriptor::Image(ImageAttachment {
            reference: Some("/v0/file/s/a.jpg".to_owned()),
            width: Some(0),
            height: Some(100),
            ..ImageAttachment::default()
        }));
        let text = full(&node);
        let RenderedObject::Image(rendered) = object(&text, 0) else {
            panic!("expected image");
        };
        assert_eq!(rendered.size, Size::new(256.0, 256.0));
        assert_eq!(rendered.placeholder, Some(ImagePlaceholder::Loading));
    }

    #[test]
    fn test_file_block() {
        let node = StyledNode::attachment(AttachmentDescriptor::File(FileAttachment {
            reference: Some("/v0/file/s/report.pdf".to_owned()),
            mime: Some("application/pdf".to_owned()),
            name: Some("report.pdf".to_owned()),
            size: Some(1536),
            key: Some(2),
            ..FileAttachment::default()
        }));
        let text = full(&node);
        let RenderedObject::File(block) = object(&text, 0) else {
            panic!("expected file");
        };
        assert_eq!(
            block,
            &FileBlock {
                valid: true,
                display_name: "report.pdf".to_owned(),
                file_name: "report.pdf".to_owned(),
                description: "PDF Document · 1.50 KB".to_owned(),
                download_url: Some(
                    "drafty://action/attachment/large?filename=report.pdf&key=2".to_owned()
                ),
                key: Some(2),
            }
        );
    }

    #[test]
    fn test_file_name_fits_width() {
        let node = StyledNode::attachment(AttachmentDescriptor::File(FileAttachment {
            bytes: Some(vec![1, 2, 3]),
            name: Some("a-very-long-file-name-for-the-quarterly-report.pdf".to_owned()),
            ..FileAttachment::default()
        }));
        let options = FormatOptions::default().with_fit_size(Size::new(110.0, 100.0));
        let text = render_full(&node, &options);
        let RenderedObject::File(block) = object(&text, 0) else {
            panic!("expected file");
        };
        assert_eq!(block.display_name, "a-v…pdf");
        assert_eq!(
            block.download_url.as_deref(),
            Some(
                "drafty://action/attachment/small?filename=a-very-long-file-name-for-the-quarterly-report.pdf"
            )
        );
    }

    #[test]
    fn test_empty_attachment_block() {
        let text = full(&StyledNode::attachment(AttachmentDescriptor::Empty));
        let RenderedObject::File(block) = object(&text, 0) else {
            panic!("expected file");
        };
        assert!(!block.valid);
        assert_eq!(block.display_name, "file_attachment");
        assert_eq!(block.description, "Unknown type");
        assert_eq!(block.download_url, None);
    }

    #[test]
    fn test_button_face_is_link_colored() {
        let node = StyledNode::attachment(AttachmentDescriptor::Button {
            face: StyledNode::leaf("Yes").with_traits(FontTraits::BOLD),
            action_url: Some("https://example.com".to_owned()),
        });
        let text = full(&node);
        let RenderedObject::Button { face, action_url } = object(&text, 0) else {
            panic!("expected button");
        };
        assert_eq!(face.to_string(), "Yes");
        assert_eq!(face.runs()[0].style.chars.text_color, Some(Color::LINK));
        assert_eq!(face.runs()[0].style.traits, FontTraits::BOLD);
        assert_eq!(action_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_quote_inner_is_faded_and_unbounded() {
        let node = StyledNode::composite(vec![
            StyledNode::attachment(AttachmentDescriptor::Quote {
                inner: StyledNode::leaf("a long quoted message"),
            }),
            StyledNode::leaf("reply"),
        ]);
        let text = preview(&node, 3);
        assert_eq!(text.to_string(), "\u{FFFC}re…");
        let RenderedObject::Quote { inner } = object(&text, 0) else {
            panic!("expected quote");
        };
        assert_eq!(inner.to_string(), "a long quoted message");
        assert_eq!(
            inner.runs()[0].style.chars.text_color,
            Some(Color::BLACK.with_alpha_scaled(QUOTE_ALPHA))
        );
    }

    #[test]
    fn test_icon_is_line_sized() {
        let text = full(&StyledNode::attachment(AttachmentDescriptor::Icon(
            crate::node::IconKind::Form,
        )));
        assert_eq!(
            object(&text, 0),
            &RenderedObject::Icon {
                kind: crate::node::IconKind::Form,
                size: Size::new(17.0, 17.0),
            }
        );
    }

    #[test]
    fn test_runs_carry_default_color() {
        let red = Color::rgb(200, 0, 0);
        let options = FormatOptions::default().with_default_style(BaseStyle {
            color: red,
            ..BaseStyle::default()
        });
        let node = StyledNode::composite(vec![
            StyledNode::leaf("plain"),
            StyledNode::leaf("link").with_char_style(CharStyle::color(Color::LINK)),
        ]);
        let text = render_full(&node, &options);
        assert_eq!(text.runs()[0].style.color, red);
        assert_eq!(text.runs()[0].style.text_color(), red);
        assert_eq!(text.runs()[1].style.text_color(), Color::LINK);
    }

    #[test]
    fn test_paragraph_style_covers_range() {
        let paragraph = ParagraphStyle {
            first_line_indent: 4.0,
            line_height_multiple: 1.0,
        };
        let node = StyledNode::composite(vec![
            StyledNode::leaf("a"),
            StyledNode::leaf("b").with_traits(FontTraits::BOLD),
        ])
        .with_paragraph_style(paragraph);
        let text = full(&node);
        assert!(text.runs().iter().all(|run| run.style.paragraph == Some(paragraph)));
    }
}
