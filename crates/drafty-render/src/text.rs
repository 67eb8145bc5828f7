//! Flat styled output.
//!
//! [`StyledText`] is a sequence of runs. A text run holds a uniformly styled
//! string; an object run holds one materialized attachment and counts as a
//! single character, shown as U+FFFC in the string view.

use std::fmt;

use crate::node::IconKind;
use crate::options::Size;
use crate::style::RunStyle;

/// Character that stands in for an object run in the string view.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Image placeholder shown until real bytes are available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImagePlaceholder {
    /// Bytes are remote and may still arrive.
    Loading,
    /// No bytes and nothing to fetch.
    Broken,
}

/// Inline image scaled to the fit box.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedImage {
    pub size: Size,
    pub bytes: Option<Vec<u8>>,
    /// Remote location for the host's resource loader.
    pub reference: Option<String>,
    pub mime: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<ImagePlaceholder>,
    pub key: Option<usize>,
}

/// Two-line file summary: name, then description and size.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileBlock {
    /// Whether the file has bytes or a reference to fetch them from.
    pub valid: bool,
    /// Name shortened to fit one line.
    pub display_name: String,
    pub file_name: String,
    /// For example `PDF Document · 2.00 MB`.
    pub description: String,
    /// Internal URL the host opens to save the file; only for valid files.
    pub download_url: Option<String>,
    pub key: Option<usize>,
}

/// A materialized attachment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderedObject {
    Image(RenderedImage),
    File(FileBlock),
    Button {
        face: StyledText,
        action_url: Option<String>,
    },
    Quote {
        inner: StyledText,
    },
    Icon {
        kind: IconKind,
        size: Size,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunContent {
    Text(String),
    Object(Box<RenderedObject>),
}

/// Uniformly styled piece of output.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    pub content: RunContent,
    pub style: RunStyle,
}

impl Run {
    #[must_use]
    pub fn char_len(&self) -> usize {
        match &self.content {
            RunContent::Text(text) => text.chars().count(),
            RunContent::Object(_) => 1,
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(text) => Some(text),
            RunContent::Object(_) => None,
        }
    }

    #[must_use]
    pub fn object(&self) -> Option<&RenderedObject> {
        match &self.content {
            RunContent::Object(object) => Some(object),
            RunContent::Text(_) => None,
        }
    }
}

/// Rendered output.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledText {
    runs: Vec<Run>,
    char_len: usize,
}

impl StyledText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    #[must_use]
    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }

    /// Length in characters, objects counting one each.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Append text, merging with the last run when the styles match.
    pub fn push_text(&mut self, text: &str, style: RunStyle) {
        if text.is_empty() {
            return;
        }
        self.char_len += text.chars().count();
        if let Some(last) = self.runs.last_mut()
            && let RunContent::Text(existing) = &mut last.content
            && last.style == style
        {
            existing.push_str(text);
            return;
        }
        self.runs.push(Run {
            content: RunContent::Text(text.to_owned()),
            style,
        });
    }

    pub fn push_object(&mut self, object: RenderedObject, style: RunStyle) {
        self.char_len += 1;
        self.runs.push(Run {
            content: RunContent::Object(Box::new(object)),
            style,
        });
    }

    pub fn append(&mut self, other: StyledText) {
        for run in other.runs {
            match run.content {
                RunContent::Text(text) => self.push_text(&text, run.style),
                RunContent::Object(_) => {
                    self.char_len += 1;
                    self.runs.push(run);
                }
            }
        }
    }

    /// Apply `f` to the style of every run.
    pub fn restyle(&mut self, mut f: impl FnMut(&mut RunStyle)) {
        for run in &mut self.runs {
            f(&mut run.style);
        }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            match &run.content {
                RunContent::Text(text) => f.write_str(text)?,
                RunContent::Object(_) => write!(f, "{OBJECT_REPLACEMENT}")?,
            }
        }
        Ok(())
    }
}
