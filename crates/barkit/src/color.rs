//! Color handling for barcode rendering
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so the same configured value can be written into an
//! SVG attribute or turned into raster pixels.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use barkit::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the 8-bit sRGB channels of this color, ignoring alpha.
    ///
    /// ```
    /// use barkit::color::Color;
    ///
    /// assert_eq!(Color::new("red").unwrap().to_rgb8(), [255, 0, 0]);
    /// ```
    pub fn to_rgb8(self) -> [u8; 3] {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        [rgba.r, rgba.g, rgba.b]
    }

    /// Returns the relative luminance of this color in `0.0..=1.0`.
    ///
    /// Bitmap formats without a palette only know "set" and "unset" pixels;
    /// this is what decides which side of that line a color falls on.
    pub fn luminance(self) -> f32 {
        let [r, g, b] = self.to_rgb8();
        (0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b)) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
