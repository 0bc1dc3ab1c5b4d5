//! PNG input, behind the same header + raw-read contract as the PNM codec.
//!
//! With the `png` feature the `png` crate does the decoding. Without it a
//! stub stands in that recognizes nothing, so callers fall through to
//! [`ImageIoError::UnrecognizedFormat`].

#[cfg(feature = "png")]
mod decode;
#[cfg(not(feature = "png"))]
mod stub;

#[cfg(feature = "png")]
pub(crate) use decode::PngSource;
#[cfg(not(feature = "png"))]
pub(crate) use stub::PngSource;

use std::io::Read;

use crate::error::ImageIoError;

// http://www.w3.org/TR/PNG-Structure.html
pub(crate) const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Read and validate the 8-byte signature. Short input is unrecognized.
pub(crate) fn read_signature<R: Read + ?Sized>(reader: &mut R) -> Result<[u8; 8], ImageIoError> {
    let mut signature = [0u8; 8];
    match reader.read_exact(&mut signature) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ImageIoError::UnrecognizedFormat);
        }
        Err(e) => return Err(e.into()),
    }
    if signature != PNG_SIGNATURE {
        return Err(ImageIoError::UnrecognizedFormat);
    }
    Ok(signature)
}
