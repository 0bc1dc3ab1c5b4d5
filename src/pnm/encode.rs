//! PNM writer. Always emits the binary sub-format (P5/P6).

use std::io::Write;

use enough::Stop;

use crate::error::ImageIoError;
use crate::pixel::PixelEncoding;

/// Write a binary PNM header for `encoding`.
///
/// The maxval is 256 for Gray8, 255 for Rgb8, 32767 for Gray16Signed and
/// 65535 for Gray16Unsigned, so each encoding sniffs back as itself.
pub fn write_header<W: Write + ?Sized>(
    writer: &mut W,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
) -> Result<(), ImageIoError> {
    let (Some(magic), Some(maxval)) = (encoding.write_magic(), encoding.write_maxval()) else {
        return Err(ImageIoError::UnrecognizedFormat);
    };
    write!(writer, "{magic}\n{width} {height}\n{maxval}\n")?;
    Ok(())
}

/// Write the sample data section: a flat dump with no padding or swapping.
///
/// `pixels` must hold at least `width * height * bytes_per_pixel` bytes;
/// anything past that is ignored.
pub fn write_data<W: Write + ?Sized>(
    writer: &mut W,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    pixels: &[u8],
    stop: impl Stop,
) -> Result<(), ImageIoError> {
    write_data_with(writer, width, height, encoding, pixels, &stop)
}

pub(crate) fn write_data_with<W: Write + ?Sized>(
    writer: &mut W,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    pixels: &[u8],
    stop: &dyn Stop,
) -> Result<(), ImageIoError> {
    if !encoding.is_known() {
        return Err(ImageIoError::UnrecognizedFormat);
    }
    let row_len = (width as usize)
        .checked_mul(encoding.bytes_per_pixel())
        .ok_or(ImageIoError::DimensionsTooLarge { width, height })?;
    let expected = row_len
        .checked_mul(height as usize)
        .ok_or(ImageIoError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(ImageIoError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }
    if expected == 0 {
        return Ok(());
    }

    for (row_idx, row) in pixels[..expected].chunks_exact(row_len).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        writer.write_all(row)?;
    }
    Ok(())
}
