//! Caller-supplied formatting options.

use crate::mode::Mode;
use crate::style::BaseStyle;

/// Default bounding box for attachment placeholders.
const DEFAULT_FIT: f32 = 300.0;

/// Width and height in points.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Localized short labels shown in previews and placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Labels {
    /// Shown next to an inline image.
    pub picture: String,
    /// Shown next to a file attachment.
    pub attachment: String,
    pub form: String,
    /// Written on a button face when the button has no content.
    pub button: String,
    pub unsupported: String,
    /// File description when the mime type is not recognized.
    pub unknown_type: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            picture: "Picture".to_owned(),
            attachment: "Attachment".to_owned(),
            form: "Form".to_owned(),
            button: "button".to_owned(),
            unsupported: "Unsupported".to_owned(),
            unknown_type: "Unknown type".to_owned(),
        }
    }
}

/// Scheme and host of internal callback URLs.
///
/// Used for `pub` buttons (`<scheme>://<host>/post?...`) and for
/// attachment download links.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEndpoint {
    pub scheme: String,
    pub host: String,
}

impl ActionEndpoint {
    /// `<scheme>://<host>` followed by `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}://{}{path}", self.scheme, self.host)
    }
}

impl Default for ActionEndpoint {
    fn default() -> Self {
        Self {
            scheme: "drafty".to_owned(),
            host: "action".to_owned(),
        }
    }
}

/// Options controlling how a document is formatted and rendered.
///
/// # Example
///
/// ```
/// use drafty_render::{FormatOptions, Mode};
///
/// let options = FormatOptions::default().with_mode(Mode::Preview).with_max_length(42);
/// assert_eq!(options.max_length, Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    /// Baseline font and color.
    pub default_style: BaseStyle,
    /// Box that image and icon placeholders are scaled to fit under.
    pub fit_size: Size,
    /// Preview character budget; `None` and full mode render without
    /// truncation.
    pub max_length: Option<usize>,
    pub mode: Mode,
    pub labels: Labels,
    pub actions: ActionEndpoint,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            default_style: BaseStyle::default(),
            fit_size: Size::new(DEFAULT_FIT, DEFAULT_FIT),
            max_length: None,
            mode: Mode::Full,
            labels: Labels::default(),
            actions: ActionEndpoint::default(),
        }
    }
}

impl FormatOptions {
    /// Preview options with the given budget.
    #[must_use]
    pub fn preview(max_length: usize) -> Self {
        Self::default()
            .with_mode(Mode::Preview)
            .with_max_length(max_length)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub fn with_fit_size(mut self, fit_size: Size) -> Self {
        self.fit_size = fit_size;
        self
    }

    #[must_use]
    pub fn with_default_style(mut self, style: BaseStyle) -> Self {
        self.default_style = style;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_actions(mut self, actions: ActionEndpoint) -> Self {
        self.actions = actions;
        self
    }
}
