//! PNM sample readers: binary (P5/P6) and ASCII (P2/P3).

use std::io::{BufRead, Read};

use enough::Stop;

use super::text::{IntToken, read_int};
use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::pixel::PixelEncoding;
use crate::raw::{ImageHeader, RawSamples};

/// Read the data section that follows a sniffed PNM header.
///
/// Binary data is copied byte for byte, so 16-bit samples keep the stream's
/// byte order. ASCII samples are narrowed to the sample width (wrapping) and
/// stored in native byte order. A short stream is an error; no partial
/// buffer is returned.
pub fn read_data<R: BufRead>(
    reader: &mut R,
    header: &ImageHeader,
    stop: impl Stop,
) -> Result<RawSamples, ImageIoError> {
    read_data_limited(reader, header, None, &stop)
}

pub(crate) fn read_data_limited<R: BufRead + ?Sized>(
    reader: &mut R,
    header: &ImageHeader,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<RawSamples, ImageIoError> {
    if !header.encoding.is_known() {
        return Err(ImageIoError::UnrecognizedFormat);
    }
    let len = header.checked_len(limits)?;
    stop.check()?;

    let data = if header.textual {
        read_ascii(reader, header, len, stop)?
    } else {
        read_binary(reader, header, len, stop)?
    };
    RawSamples::new(*header, data)
}

/// Upper bound on the up-front reservation for ASCII samples.
const ASCII_RESERVE_CAP: usize = 1 << 16;

fn read_binary<R: BufRead + ?Sized>(
    reader: &mut R,
    header: &ImageHeader,
    len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageIoError> {
    // Grows only with bytes that arrive; the header alone never sizes it.
    let mut data = Vec::new();
    if len == 0 {
        return Ok(data);
    }
    let row_len = header.row_len() as u64;
    for row_idx in 0..header.height {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        let got = Read::take(&mut *reader, row_len).read_to_end(&mut data)?;
        if got as u64 != row_len {
            return Err(ImageIoError::UnexpectedEof);
        }
    }
    Ok(data)
}

fn read_ascii<R: BufRead + ?Sized>(
    reader: &mut R,
    header: &ImageHeader,
    len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ImageIoError> {
    let samples_per_row = header.width as usize * header.encoding.channels();
    let sample_count = len / header.encoding.bytes_per_sample();
    let mut data = Vec::with_capacity(len.min(ASCII_RESERVE_CAP));

    for i in 0..sample_count {
        if samples_per_row > 0 && i % (samples_per_row * 16) == 0 {
            stop.check()?;
        }
        let v = match read_int(reader)? {
            IntToken::Value(v) => v,
            IntToken::Eof => return Err(ImageIoError::UnexpectedEof),
            IntToken::Invalid => {
                return Err(ImageIoError::InvalidData(format!(
                    "sample {i} is not an integer"
                )));
            }
        };
        // Narrowing wraps like a C integer conversion.
        match header.encoding {
            PixelEncoding::Gray8 | PixelEncoding::Rgb8 => data.push(v as u8),
            PixelEncoding::Gray16Signed => data.extend_from_slice(&(v as i16).to_ne_bytes()),
            PixelEncoding::Gray16Unsigned => data.extend_from_slice(&(v as u16).to_ne_bytes()),
            PixelEncoding::Unknown => return Err(ImageIoError::UnrecognizedFormat),
        }
    }
    Ok(data)
}
