//! Optional output capabilities of the running build.

/// Output capabilities, detected once at startup and passed explicitly to
/// the parser and the `list` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    raster: bool,
}

impl Capabilities {
    pub const fn new(raster: bool) -> Self {
        Self { raster }
    }

    /// Probes the linked barkit library.
    pub fn detect() -> Self {
        Self::new(barkit::raster_available())
    }

    /// Whether raster image output (`--type png`, ...) is available.
    pub fn raster(&self) -> bool {
        self.raster
    }
}
