//! One-bit bitmap containers the `image` crate has no encoder for.
//!
//! All three formats store black-and-white pixels, so the barcode is reduced
//! to a [`Bitmap`] of dark/light pixels first.

use crate::error::RenderError;

/// Black-and-white pixel grid, `true` meaning a dark pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    pub(crate) fn new(width: u32, height: u32, mut dark: impl FnMut(u32, u32) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(dark(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn row(&self, y: u32) -> &[bool] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Packs one row MSB first, `set` deciding which pixels become 1 bits.
    fn pack_row_msb(&self, y: u32, set: impl Fn(bool) -> bool, stride: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; stride];
        for (x, &dark) in self.row(y).iter().enumerate() {
            if set(dark) {
                bytes[x / 8] |= 0x80 >> (x % 8);
            }
        }
        bytes
    }

    fn dimensions_u16(&self, format: &'static str) -> Result<(u16, u16), RenderError> {
        let too_large = || RenderError::TooLarge {
            format,
            width: self.width,
            height: self.height,
        };
        let width = u16::try_from(self.width).map_err(|_| too_large())?;
        let height = u16::try_from(self.height).map_err(|_| too_large())?;
        Ok((width, height))
    }
}

/// Encodes an X11 bitmap (C source text). Set bits are dark pixels, packed
/// least significant bit first.
pub(crate) fn xbm(bitmap: &Bitmap) -> Vec<u8> {
    let stride = bitmap.width.div_ceil(8) as usize;
    let mut out = format!(
        "#define barcode_width {}\n#define barcode_height {}\n",
        bitmap.width, bitmap.height
    );
    out.push_str("static char barcode_bits[] = {\n");

    let mut bytes = Vec::with_capacity(stride * bitmap.height as usize);
    for y in 0..bitmap.height {
        let mut row = vec![0u8; stride];
        for (x, &dark) in bitmap.row(y).iter().enumerate() {
            if dark {
                row[x / 8] |= 1 << (x % 8);
            }
        }
        bytes.extend(row);
    }

    let lines: Vec<String> = bytes
        .chunks(12)
        .map(|chunk| {
            chunk
                .iter()
                .map(|byte| format!("0x{byte:02x}"))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    out.push_str(&lines.join(",\n"));
    out.push_str("\n};\n");

    out.into_bytes()
}

/// Encodes a Microsoft Paint version 1 image (uncompressed). Set bits are
/// light pixels.
pub(crate) fn msp(bitmap: &Bitmap) -> Result<Vec<u8>, RenderError> {
    let (width, height) = bitmap.dimensions_u16("MSP")?;

    let mut header = [0u16; 16];
    header[0] = u16::from_le_bytes(*b"Da");
    header[1] = u16::from_le_bytes(*b"nM");
    header[2] = width;
    header[3] = height;
    header[4..8].fill(1);
    header[8] = width;
    header[9] = height;
    header[12] = header[..12].iter().fold(0, |acc, word| acc ^ word);

    let stride = bitmap.width.div_ceil(8) as usize;
    let mut out = Vec::with_capacity(32 + stride * bitmap.height as usize);
    for word in header {
        out.extend_from_slice(&word.to_le_bytes());
    }
    for y in 0..bitmap.height {
        out.extend(bitmap.pack_row_msb(y, |dark| !dark, stride));
    }

    Ok(out)
}

/// Encodes a version 5 PCX image with one bit per pixel. Set bits are light
/// pixels; rows are run-length encoded as the format requires.
pub(crate) fn pcx(bitmap: &Bitmap, dpi: u32) -> Result<Vec<u8>, RenderError> {
    let (width, height) = bitmap.dimensions_u16("PCX")?;
    if width == 0 || height == 0 {
        return Err(RenderError::Empty);
    }
    let dpi = u16::try_from(dpi).unwrap_or(u16::MAX);

    // Scanlines are padded to an even number of bytes.
    let stride = (bitmap.width.div_ceil(8) as usize + 1) & !1;

    let mut header = [0u8; 128];
    header[0] = 0x0a;
    header[1] = 5;
    header[2] = 1;
    header[3] = 1;
    header[8..10].copy_from_slice(&(width - 1).to_le_bytes());
    header[10..12].copy_from_slice(&(height - 1).to_le_bytes());
    header[12..14].copy_from_slice(&dpi.to_le_bytes());
    header[14..16].copy_from_slice(&dpi.to_le_bytes());
    // Two entry palette: black, white.
    header[19..22].fill(0xff);
    header[65] = 1;
    header[66..68].copy_from_slice(&(stride as u16).to_le_bytes());
    header[68] = 1;

    let mut out = header.to_vec();
    for y in 0..bitmap.height {
        rle_encode(&bitmap.pack_row_msb(y, |dark| !dark, stride), &mut out);
    }

    Ok(out)
}

fn rle_encode(row: &[u8], out: &mut Vec<u8>) {
    let mut index = 0;
    while index < row.len() {
        let byte = row[index];
        let run = row[index..]
            .iter()
            .take(63)
            .take_while(|&&b| b == byte)
            .count();

        if run > 1 || byte >= 0xc0 {
            out.push(0xc0 | run as u8);
        }
        out.push(byte);
        index += run;
    }
}
