//! Geometry shared by the writers.
//!
//! Barcodes are laid out in millimetres: a quiet zone, the bars, and a
//! second quiet zone horizontally; the bars and optionally the text line
//! vertically. [`VectorGeometry`] keeps those units for SVG output and
//! [`RasterGeometry`] snaps them onto a pixel grid for a given resolution.

use crate::{config::Style, error::RenderError};

const MM_PER_INCH: f32 = 25.4;
const MM_PER_POINT: f32 = 0.352_778;

/// Largest raster image, in pixels, a writer will allocate.
pub const MAX_RASTER_PIXELS: u64 = 1 << 28;

/// A run of consecutive dark modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Index of the first module of the run.
    pub start: usize,
    /// Number of modules in the run.
    pub width: usize,
}

/// Groups consecutive dark modules into bars.
///
/// ```
/// use barkit::layout::{bars, Bar};
///
/// let runs = bars(&[1, 1, 0, 1, 0, 0, 1, 1, 1]);
/// assert_eq!(runs, vec![
///     Bar { start: 0, width: 2 },
///     Bar { start: 3, width: 1 },
///     Bar { start: 6, width: 3 },
/// ]);
/// ```
pub fn bars(modules: &[u8]) -> Vec<Bar> {
    let mut runs = Vec::new();
    let mut current: Option<Bar> = None;

    for (index, &module) in modules.iter().enumerate() {
        if module == 0 {
            runs.extend(current.take());
        } else if let Some(bar) = current.as_mut() {
            bar.width += 1;
        } else {
            current = Some(Bar { start: index, width: 1 });
        }
    }
    runs.extend(current);

    runs
}

/// Document geometry in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorGeometry {
    pub width: f32,
    pub height: f32,
    pub module_width: f32,
    pub bar_height: f32,
    pub quiet_zone: f32,
    /// Font size converted to millimetres; zero when no text is drawn.
    pub font_size: f32,
    /// Vertical position of the text baseline.
    pub text_baseline: f32,
}

impl VectorGeometry {
    pub fn new(style: &Style, module_count: usize) -> Self {
        let module_width = style.module_width();
        let quiet_zone = style.quiet_zone();
        let bar_height = style.module_height();
        let width = module_width.mul_add(module_count as f32, 2.0 * quiet_zone);

        let (font_size, text_baseline, height) = if style.show_text() {
            let font_size = style.font_size() as f32 * MM_PER_POINT;
            let baseline = bar_height + style.text_distance();
            // Leave room for descenders below the baseline.
            (font_size, baseline, baseline + font_size / 2.0)
        } else {
            (0.0, bar_height, bar_height)
        };

        Self {
            width,
            height,
            module_width,
            bar_height,
            quiet_zone,
            font_size,
            text_baseline,
        }
    }

    /// Left edge of the given module.
    pub fn module_x(&self, module: usize) -> f32 {
        self.module_width.mul_add(module as f32, self.quiet_zone)
    }
}

/// Pixel geometry for raster output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterGeometry {
    pub width: u32,
    pub height: u32,
    pub module_width: u32,
    pub quiet_zone: u32,
}

impl RasterGeometry {
    /// Snaps the style onto the pixel grid of its resolution.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TooLarge`] when the image would not fit in
    /// [`MAX_RASTER_PIXELS`].
    pub fn new(style: &Style, module_count: usize) -> Result<Self, RenderError> {
        let px_per_mm = f64::from(style.dpi()) / f64::from(MM_PER_INCH);
        let module_width = to_pixels(style.module_width(), px_per_mm).max(1);
        let quiet_zone = to_pixels(style.quiet_zone(), px_per_mm);
        let height = to_pixels(style.module_height(), px_per_mm).max(1);

        let too_large = || RenderError::TooLarge {
            format: "raster",
            width: u32::try_from(module_width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
        };

        let width = u64::try_from(module_count)
            .ok()
            .and_then(|count| module_width.checked_mul(count))
            .and_then(|bars| bars.checked_add(quiet_zone.checked_mul(2)?))
            .ok_or_else(too_large)?;
        let pixels = width.checked_mul(height).ok_or_else(too_large)?;
        if pixels > MAX_RASTER_PIXELS {
            return Err(RenderError::TooLarge {
                format: "raster",
                width: u32::try_from(width).unwrap_or(u32::MAX),
                height: u32::try_from(height).unwrap_or(u32::MAX),
            });
        }

        // Every dimension is bounded by the pixel limit, so these fit.
        Ok(Self {
            width: width as u32,
            height: height as u32,
            module_width: module_width as u32,
            quiet_zone: quiet_zone as u32,
        })
    }

    /// Horizontal pixel range covered by a bar.
    pub fn bar_span(&self, bar: &Bar) -> std::ops::Range<u32> {
        let start = self.quiet_zone + bar.start as u32 * self.module_width;
        start..start + bar.width as u32 * self.module_width
    }
}

/// Converts millimetres to whole pixels, saturating on absurd lengths.
fn to_pixels(mm: f32, px_per_mm: f64) -> u64 {
    // Float to int casts saturate, and `resolve` rejects NaN.
    (f64::from(mm) * px_per_mm).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_bars_empty_and_all_light() {
        assert!(bars(&[]).is_empty());
        assert!(bars(&[0, 0, 0]).is_empty());
    }

    #[test]
    fn test_bars_trailing_run() {
        assert_eq!(bars(&[0, 1, 1]), vec![Bar { start: 1, width: 2 }]);
    }

    #[test]
    fn test_bars_cover_every_dark_module() {
        let modules = [1, 0, 1, 1, 0, 0, 1, 0, 1, 1, 1];
        let dark: usize = bars(&modules).iter().map(|bar| bar.width).sum();
        assert_eq!(dark, modules.iter().filter(|&&m| m == 1).count());
    }

    #[test]
    fn test_vector_geometry_default_style() {
        let style = Style::default();
        let geometry = VectorGeometry::new(&style, 100);
        assert!((geometry.width - 33.0).abs() < 1e-4);
        assert!((geometry.module_x(0) - 6.5).abs() < 1e-4);
        assert!((geometry.module_x(10) - 8.5).abs() < 1e-4);
        assert!(geometry.height > geometry.text_baseline);
        assert!(geometry.text_baseline > geometry.bar_height);
    }

    #[test]
    fn test_raster_geometry_default_style() {
        let style = Style::default();
        let geometry = RasterGeometry::new(&style, 95).unwrap();
        // 0.2mm at 300dpi is 2.36px, 6.5mm is 76.77px, 15mm is 177.17px.
        assert_eq!(geometry.module_width, 2);
        assert_eq!(geometry.quiet_zone, 77);
        assert_eq!(geometry.height, 177);
        assert_eq!(geometry.width, 95 * 2 + 2 * 77);
        assert_eq!(geometry.bar_span(&Bar { start: 3, width: 2 }), 83..87);
    }

    #[test]
    fn test_raster_geometry_rejects_oversized_images() {
        let config: AppConfig = toml::from_str("[style]\nmodule_width = 1000000.0\n").unwrap();
        let style = config.style().resolve().unwrap();
        assert!(matches!(
            RasterGeometry::new(&style, 95),
            Err(RenderError::TooLarge { format: "raster", .. })
        ));
    }

    #[test]
    fn test_raster_geometry_within_pixel_limit() {
        let style = Style::default();
        let geometry = RasterGeometry::new(&style, 10_000).unwrap();
        assert!(u64::from(geometry.width) * u64::from(geometry.height) <= MAX_RASTER_PIXELS);
    }
}
