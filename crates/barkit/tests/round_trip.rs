//! Raster round trip: write a PNG, read it back and recover the modules.

#![cfg(feature = "raster")]

use tempfile::tempdir;

use barkit::{
    OutputKind, RasterFormat, Symbology,
    config::Style,
    layout::RasterGeometry,
    writer::ImageWriter,
};

/// Samples the centre of every module on the middle row of the image.
fn read_modules(path: &std::path::Path, module_count: usize) -> Vec<u8> {
    let img = image::open(path).expect("Failed to decode image").to_luma8();
    let geometry = RasterGeometry::new(&Style::default(), module_count).unwrap();
    assert_eq!(img.dimensions(), (geometry.width, geometry.height));

    let y = geometry.height / 2;
    (0..module_count as u32)
        .map(|module| {
            let x = geometry.quiet_zone + module * geometry.module_width + geometry.module_width / 2;
            u8::from(img.get_pixel(x, y)[0] < 128)
        })
        .collect()
}

fn round_trip(symbology: Symbology, code: &str, format: RasterFormat) {
    let dir = tempdir().expect("Failed to create temp directory");
    let expected = symbology.encode(code).unwrap();

    let path = barkit::generate(
        symbology,
        code,
        &ImageWriter::new(Style::default()),
        &dir.path().join("round-trip"),
        &OutputKind::Raster { format },
    )
    .expect("Failed to generate barcode");

    assert_eq!(
        read_modules(&path, expected.modules().len()),
        expected.modules(),
        "{symbology} {code} as {format}"
    );
}

#[test]
fn test_code39_png_round_trip() {
    round_trip(Symbology::Code39, "123456789012", RasterFormat::Png);
}

#[test]
fn test_ean13_bmp_round_trip() {
    round_trip(Symbology::Ean13, "590123412345", RasterFormat::Bmp);
}

#[test]
fn test_pzn_tiff_round_trip() {
    round_trip(Symbology::Pzn, "123456", RasterFormat::Tiff);
}
