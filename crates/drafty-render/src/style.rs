//! Style descriptors.
//!
//! Styles are split the same way the renderer applies them:
//!
//! - [`FontTraits`] accumulate from ancestors and are applied at leaves only.
//! - [`CharStyle`] is added over the full rendered range of a node. Adding never
//!   clears a field already set by a descendant unless the parent names it too.
//! - [`ParagraphStyle`] is attached to a node's range as a whole.
//!
//! [`RunStyle`] is the resolved style of a single output run.

use bitflags::bitflags;

bitflags! {
    /// Font emphasis traits.
    ///
    /// Traits form a set: nesting `BOLD` inside `ITALIC` or the other way
    /// around yields the same union.
    ///
    /// ```
    /// use drafty_render::FontTraits;
    ///
    /// let traits = FontTraits::BOLD | FontTraits::ITALIC;
    /// assert!(traits.contains(FontTraits::ITALIC));
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FontTraits: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
    }
}

/// RGBA text color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Color of links and button faces.
    pub const LINK: Self = Self::rgb(0, 122, 255);
    /// Secondary text, such as the file description line.
    pub const GRAY: Self = Self::rgb(142, 142, 147);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Scale the alpha channel by `factor` (clamped to `0.0..=1.0`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            a: (f32::from(self.a) * factor).round() as u8,
            ..self
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// ```
    /// use drafty_render::Color;
    ///
    /// assert_eq!(Color::from_hex("#007AFF"), Some(Color::LINK));
    /// assert_eq!(Color::from_hex("007AFF"), None);
    /// ```
    #[must_use]
    pub fn from_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

/// Character-level style added over a node's rendered range.
///
/// Flags only ever switch on. Value fields override only when set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharStyle {
    pub strikethrough: bool,
    /// Switch the font family to monospace, keeping weight and slant.
    pub monospace: bool,
    /// Decorative border drawn around the range (non-clickable button faces).
    pub border: bool,
    pub link_target: Option<String>,
    pub text_color: Option<Color>,
    pub baseline_offset: Option<f32>,
}

impl CharStyle {
    #[must_use]
    pub fn strikethrough() -> Self {
        Self {
            strikethrough: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn monospace() -> Self {
        Self {
            monospace: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn link(target: impl Into<String>) -> Self {
        Self {
            link_target: Some(target.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn color(color: Color) -> Self {
        Self {
            text_color: Some(color),
            ..Self::default()
        }
    }

    /// Add `over` on top of `self`.
    ///
    /// Fields not named by `over` are left as they are.
    pub fn add(&mut self, over: &Self) {
        self.strikethrough |= over.strikethrough;
        self.monospace |= over.monospace;
        self.border |= over.border;
        if let Some(target) = &over.link_target {
            self.link_target = Some(target.clone());
        }
        if let Some(color) = over.text_color {
            self.text_color = Some(color);
        }
        if let Some(offset) = over.baseline_offset {
            self.baseline_offset = Some(offset);
        }
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Paragraph-level style.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParagraphStyle {
    /// Indent of the first line, in points.
    pub first_line_indent: f32,
    pub line_height_multiple: f32,
}

/// Baseline font and color used where no node overrides them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStyle {
    pub font_family: String,
    pub font_size: f32,
    pub color: Color,
}

impl Default for BaseStyle {
    fn default() -> Self {
        Self {
            font_family: "system-ui".to_owned(),
            font_size: 17.0,
            color: Color::BLACK,
        }
    }
}

/// Resolved style of one output run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStyle {
    pub font_family: String,
    pub font_size: f32,
    /// Base text color; `chars.text_color` takes precedence when set.
    pub color: Color,
    pub traits: FontTraits,
    pub chars: CharStyle,
    pub paragraph: Option<ParagraphStyle>,
}

impl RunStyle {
    /// Base font with `traits` applied and no character style.
    #[must_use]
    pub fn new(base: &BaseStyle, traits: FontTraits) -> Self {
        Self {
            font_family: base.font_family.clone(),
            font_size: base.font_size,
            color: base.color,
            traits,
            chars: CharStyle::default(),
            paragraph: None,
        }
    }

    /// Color the run is drawn in.
    #[must_use]
    pub fn text_color(&self) -> Color {
        self.chars.text_color.unwrap_or(self.color)
    }

    /// Whether the run carries nothing beyond the base font.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.traits.is_empty() && self.chars.is_empty() && self.paragraph.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_traits_union_is_order_independent() {
        let a = FontTraits::BOLD | FontTraits::ITALIC;
        let b = FontTraits::ITALIC | FontTraits::BOLD;
        assert_eq!(a, b);
    }

    #[test]
    fn test_add_keeps_fields_not_named() {
        let mut style = CharStyle::link("https://example.com");
        style.add(&CharStyle::strikethrough());
        assert!(style.strikethrough);
        assert_eq!(style.link_target.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_add_overrides_named_fields() {
        let mut style = CharStyle::color(Color::BLACK);
        style.add(&CharStyle::color(Color::LINK));
        assert_eq!(style.text_color, Some(Color::LINK));
    }

    #[test]
    fn test_add_never_clears_flags() {
        let mut style = CharStyle::monospace();
        style.add(&CharStyle::default());
        assert!(style.monospace);
    }

    #[test]
    fn test_color_from_hex_with_alpha() {
        assert_eq!(
            Color::from_hex("#11223380"),
            Some(Color {
                r: 0x11,
                g: 0x22,
                b: 0x33,
                a: 0x80
            })
        );
    }

    #[test]
    fn test_color_from_hex_rejects_garbage() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn test_alpha_scaling() {
        assert_eq!(Color::BLACK.with_alpha_scaled(0.5).a, 128);
        assert_eq!(Color::BLACK.with_alpha_scaled(2.0).a, 255);
    }

    #[test]
    fn test_new_run_style_is_plain() {
        let style = RunStyle::new(&BaseStyle::default(), FontTraits::empty());
        assert!(style.is_plain());
        assert!(!RunStyle::new(&BaseStyle::default(), FontTraits::BOLD).is_plain());
    }

    #[test]
    fn test_run_color_defaults_to_base() {
        let base = BaseStyle {
            color: Color::GRAY,
            ..BaseStyle::default()
        };
        let mut style = RunStyle::new(&base, FontTraits::empty());
        assert_eq!(style.color, Color::GRAY);
        assert_eq!(style.text_color(), Color::GRAY);

        style.chars.add(&CharStyle::color(Color::LINK));
        assert_eq!(style.text_color(), Color::LINK);
    }
}
