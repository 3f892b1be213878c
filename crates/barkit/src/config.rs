//! Configuration types for barcode rendering.
//!
//! This module provides configuration structures that control how barcodes
//! are drawn. All types implement [`serde::Deserialize`] for flexible loading
//! from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`StyleConfig`] - Raw, deserializable drawing options (sizes in millimetres).
//! - [`Style`] - A validated [`StyleConfig`] with parsed colors, as consumed by the writers.
//!
//! # Example
//!
//! ```
//! # use barkit::config::AppConfig;
//! let config = AppConfig::default();
//! let style = config.style().resolve().unwrap();
//! assert_eq!(style.dpi(), 300);
//! ```

use serde::Deserialize;

use crate::{color::Color, error::BarkitError};

/// Highest raster resolution accepted in a style.
pub const MAX_DPI: u32 = 9600;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Drawing options for rendered barcodes.
///
/// Lengths are in millimetres, the font size in points. Fields that are not
/// set fall back to the defaults below.
///
/// | Field | Default |
/// |-------|---------|
/// | `module_width` | `0.2` |
/// | `module_height` | `15.0` |
/// | `quiet_zone` | `6.5` |
/// | `font_size` | `10` |
/// | `text_distance` | `5.0` |
/// | `background` | `"white"` |
/// | `foreground` | `"black"` |
/// | `show_text` | `true` |
/// | `dpi` | `300` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    module_width: f32,
    module_height: f32,
    quiet_zone: f32,
    font_size: u32,
    text_distance: f32,
    background: String,
    foreground: String,
    show_text: bool,
    dpi: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            module_width: 0.2,
            module_height: 15.0,
            quiet_zone: 6.5,
            font_size: 10,
            text_distance: 5.0,
            background: "white".to_string(),
            foreground: "black".to_string(),
            show_text: true,
            dpi: 300,
        }
    }
}

impl StyleConfig {
    /// Validates this configuration and parses its colors.
    ///
    /// # Errors
    ///
    /// Returns [`BarkitError::Config`] if a color cannot be parsed, a length
    /// is negative or not finite, the module size is zero, or `dpi` is outside
    /// `1..=`[`MAX_DPI`].
    pub fn resolve(&self) -> Result<Style, BarkitError> {
        for (name, value) in [
            ("module_width", self.module_width),
            ("module_height", self.module_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BarkitError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("quiet_zone", self.quiet_zone),
            ("text_distance", self.text_distance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BarkitError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !(1..=MAX_DPI).contains(&self.dpi) {
            return Err(BarkitError::Config(format!(
                "dpi must be between 1 and {MAX_DPI}, got {}",
                self.dpi
            )));
        }

        let background = Color::new(&self.background)
            .map_err(|err| BarkitError::Config(format!("Invalid background color in config: {err}")))?;
        let foreground = Color::new(&self.foreground)
            .map_err(|err| BarkitError::Config(format!("Invalid foreground color in config: {err}")))?;

        Ok(Style {
            module_width: self.module_width,
            module_height: self.module_height,
            quiet_zone: self.quiet_zone,
            font_size: self.font_size,
            text_distance: self.text_distance,
            background,
            foreground,
            show_text: self.show_text,
            dpi: self.dpi,
        })
    }
}

/// Validated drawing options.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    module_width: f32,
    module_height: f32,
    quiet_zone: f32,
    font_size: u32,
    text_distance: f32,
    background: Color,
    foreground: Color,
    show_text: bool,
    dpi: u32,
}

impl Default for Style {
    fn default() -> Self {
        StyleConfig::default()
            .resolve()
            .expect("default style configuration is valid")
    }
}

impl Style {
    /// Width of a single module in millimetres.
    pub fn module_width(&self) -> f32 {
        self.module_width
    }

    /// Height of the bars in millimetres.
    pub fn module_height(&self) -> f32 {
        self.module_height
    }

    /// Blank margin left and right of the bars, in millimetres.
    pub fn quiet_zone(&self) -> f32 {
        self.quiet_zone
    }

    /// Font size of the human readable text, in points.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Gap between the bars and the text baseline, in millimetres.
    pub fn text_distance(&self) -> f32 {
        self.text_distance
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    /// Whether the human readable text is drawn under the bars.
    pub fn show_text(&self) -> bool {
        self.show_text && self.font_size > 0
    }

    /// Raster resolution in dots per inch.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_resolves() {
        let style = Style::default();
        assert_eq!(style.module_width(), 0.2);
        assert_eq!(style.module_height(), 15.0);
        assert_eq!(style.quiet_zone(), 6.5);
        assert_eq!(style.font_size(), 10);
        assert!(style.show_text());
        assert_eq!(style.foreground().to_rgb8(), [0, 0, 0]);
        assert_eq!(style.background().to_rgb8(), [255, 255, 255]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            dpi = 72
            foreground = "navy"
            "#,
        )
        .unwrap();

        let style = config.style().resolve().unwrap();
        assert_eq!(style.dpi(), 72);
        assert_eq!(style.foreground().to_rgb8(), [0, 0, 128]);
        assert_eq!(style.module_width(), 0.2);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.style().resolve().unwrap(), Style::default());
    }

    #[test]
    fn test_unknown_style_key_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[style]\nbar_width = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config: AppConfig = toml::from_str("[style]\nmodule_width = 0.0\n").unwrap();
        assert!(matches!(
            config.style().resolve(),
            Err(BarkitError::Config(msg)) if msg.contains("module_width")
        ));

        let config: AppConfig = toml::from_str("[style]\nbackground = \"nope\"\n").unwrap();
        assert!(matches!(
            config.style().resolve(),
            Err(BarkitError::Config(msg)) if msg.contains("background")
        ));

        let config: AppConfig = toml::from_str("[style]\ndpi = 0\n").unwrap();
        assert!(config.style().resolve().is_err());
    }

    #[test]
    fn test_dpi_is_bounded() {
        let config: AppConfig = toml::from_str("[style]\ndpi = 4000000000\n").unwrap();
        assert!(matches!(
            config.style().resolve(),
            Err(BarkitError::Config(msg)) if msg.contains("dpi must be between 1 and 9600")
        ));

        let config: AppConfig = toml::from_str("[style]\ndpi = 9600\n").unwrap();
        assert_eq!(config.style().resolve().unwrap().dpi(), MAX_DPI);
    }

    #[test]
    fn test_hidden_text_when_font_size_zero() {
        let config: AppConfig = toml::from_str("[style]\nfont_size = 0\n").unwrap();
        assert!(!config.style().resolve().unwrap().show_text());
    }
}
