//! The `list` action.

use std::io::{self, Write};

use barkit::{RasterFormat, Symbology};

use crate::capabilities::Capabilities;

/// Prints the supported barcodes and image formats.
pub fn run(capabilities: Capabilities, out: &mut impl Write) -> io::Result<()> {
    let barcodes: Vec<&str> = Symbology::names().collect();

    writeln!(out, "\nbarkit available barcode formats:")?;
    writeln!(out, "{}", barcodes.join(", "))?;
    writeln!(out, "\n")?;
    writeln!(out, "Available image formats")?;
    writeln!(out, "Standard: svg")?;
    if capabilities.raster() {
        let formats: Vec<&str> = RasterFormat::ALL.iter().map(|format| format.name()).collect();
        writeln!(out, "PIL: {}", formats.join(", "))?;
    } else {
        writeln!(out, "PIL: disabled")?;
    }
    writeln!(out, "\n")?;

    out.flush()
}
