//! Example: Writing one payload in every available output format
//!
//! Run with `cargo run --example write_all_formats -- <output-dir>`.

use std::{env, path::PathBuf};

use barkit::{
    OutputKind, RasterFormat, Symbology,
    config::Style,
    writer::{self, Writer},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(env::temp_dir);
    let style = Style::default();

    let mut kinds = vec![
        OutputKind::Vector { compress: false },
        OutputKind::Vector { compress: true },
    ];
    if barkit::raster_available() {
        kinds.extend(RasterFormat::ALL.map(|format| OutputKind::Raster { format }));
    }

    for kind in &kinds {
        let writer: Box<dyn Writer> = writer::for_output(kind, style.clone())?;
        let output = dir.join(format!("example-{}", kind.to_string().to_lowercase()));
        let path = barkit::generate(Symbology::Ean13, "590123412345", writer.as_ref(), &output, kind)?;
        println!("{kind}: {}", path.display());
    }

    Ok(())
}
