//! Configuration for the Drafty formatter.
//!
//! Parses `drafty.toml` with serde and provides auto-discovery of the config
//! file in parent directories. Every section is optional; missing values take
//! the formatter's defaults.
//!
//! ```toml
//! [style]
//! font_family = "system-ui"
//! font_size = 17.0
//! color = "#000000"
//!
//! [layout]
//! fit_width = 300.0
//! fit_height = 300.0
//!
//! [preview]
//! max_length = 42
//! quote_max_length = 30
//!
//! [labels]
//! picture = "Picture"
//!
//! [actions]
//! scheme = "drafty"
//! host = "action"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `style.font_family`
//! - `actions.scheme`
//! - `actions.host`

mod expand;

use std::path::{Path, PathBuf};

use drafty_render::{ActionEndpoint, BaseStyle, Color, FormatOptions, Labels, Mode, Size};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "drafty.toml";

/// Formatter configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub style: StyleConfig,
    pub layout: LayoutConfig,
    pub preview: PreviewConfig,
    pub labels: LabelsConfig,
    pub actions: ActionsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Baseline text style.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_family: String,
    /// Font size in points.
    pub font_size: f32,
    /// `#RRGGBB` or `#RRGGBBAA`.
    pub color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let base = BaseStyle::default();
        Self {
            font_family: base.font_family,
            font_size: base.font_size,
            color: "#000000".to_owned(),
        }
    }
}

/// Box that attachment placeholders are scaled to fit.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub fit_width: f32,
    pub fit_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let fit = FormatOptions::default().fit_size;
        Self {
            fit_width: fit.width,
            fit_height: fit.height,
        }
    }
}

/// Preview budgets.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Character budget of message previews.
    pub max_length: usize,
    /// Character budget of quoted-reply previews.
    pub quote_max_length: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_length: 42,
            quote_max_length: 30,
        }
    }
}

/// Localized labels.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub picture: String,
    pub attachment: String,
    pub form: String,
    pub button: String,
    pub unsupported: String,
    pub unknown_type: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        let labels = Labels::default();
        Self {
            picture: labels.picture,
            attachment: labels.attachment,
            form: labels.form,
            button: labels.button,
            unsupported: labels.unsupported,
            unknown_type: labels.unknown_type,
        }
    }
}

impl From<&LabelsConfig> for Labels {
    fn from(config: &LabelsConfig) -> Self {
        Self {
            picture: config.picture.clone(),
            attachment: config.attachment.clone(),
            form: config.form.clone(),
            button: config.button.clone(),
            unsupported: config.unsupported.clone(),
            unknown_type: config.unknown_type.clone(),
        }
    }
}

/// Scheme and host of internal callback URLs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActionsConfig {
    pub scheme: String,
    pub host: String,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        let endpoint = ActionEndpoint::default();
        Self {
            scheme: endpoint.scheme,
            host: endpoint.host,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Color value that is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid color in {field}: {value:?}")]
    InvalidColor { field: String, value: String },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar { field: String, message: String },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a finite, strictly positive number.
fn require_positive(value: f32, field: &str) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

fn parse_color(value: &str, field: &str) -> Result<Color, ConfigError> {
    Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `drafty.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        let discovered = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config_from(&cwd));
        match discovered {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.style.font_family, "style.font_family")?;
        expand::expand_in_place(&mut self.actions.scheme, "actions.scheme")?;
        expand::expand_in_place(&mut self.actions.host, "actions.host")?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` or `ConfigError::InvalidColor` if
    /// any check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_style()?;
        self.validate_layout()?;
        self.validate_preview()?;
        self.validate_actions()?;
        Ok(())
    }

    fn validate_style(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.style.font_family, "style.font_family")?;
        require_positive(self.style.font_size, "style.font_size")?;
        parse_color(&self.style.color, "style.color")?;
        Ok(())
    }

    fn validate_layout(&self) -> Result<(), ConfigError> {
        require_positive(self.layout.fit_width, "layout.fit_width")?;
        require_positive(self.layout.fit_height, "layout.fit_height")?;
        Ok(())
    }

    fn validate_preview(&self) -> Result<(), ConfigError> {
        if self.preview.max_length == 0 {
            return Err(ConfigError::Validation(
                "preview.max_length must be greater than 0".to_owned(),
            ));
        }
        if self.preview.quote_max_length == 0 {
            return Err(ConfigError::Validation(
                "preview.quote_max_length must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Scheme per RFC 3986: a letter, then letters, digits, `+`, `-` or `.`.
    fn validate_actions(&self) -> Result<(), ConfigError> {
        let scheme = &self.actions.scheme;
        require_non_empty(scheme, "actions.scheme")?;
        let mut chars = scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(ConfigError::Validation(format!(
                "actions.scheme is not a valid URL scheme: {scheme}"
            )));
        }
        require_non_empty(&self.actions.host, "actions.host")?;
        Ok(())
    }

    /// Formatter options for `mode`.
    ///
    /// Preview uses `preview.max_length`, a quote inside a preview uses
    /// `preview.quote_max_length`, and full mode is unbounded.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidColor` if `style.color` does not parse.
    pub fn format_options(&self, mode: Mode) -> Result<FormatOptions, ConfigError> {
        let default_style = BaseStyle {
            font_family: self.style.font_family.clone(),
            font_size: self.style.font_size,
            color: parse_color(&self.style.color, "style.color")?,
        };
        let mut options = FormatOptions::default()
            .with_mode(mode)
            .with_default_style(default_style)
            .with_fit_size(Size::new(self.layout.fit_width, self.layout.fit_height))
            .with_labels(Labels::from(&self.labels))
            .with_actions(ActionEndpoint {
                scheme: self.actions.scheme.clone(),
                host: self.actions.host.clone(),
            });
        options.max_length = match mode {
            Mode::Full => None,
            Mode::Preview => Some(self.preview.max_length),
            Mode::QuoteInsidePreview => Some(self.preview.quote_max_length),
        };
        Ok(options)
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config_from(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let candidate = dir.join(CONFIG_FILENAME);
        candidate.is_file().then_some(candidate)
    })
}
