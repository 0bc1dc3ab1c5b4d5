use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::pixel::PixelEncoding;

/// Header produced by sniffing a PNM or PNG stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub encoding: PixelEncoding,
    pub width: u32,
    pub height: u32,
    /// ASCII PNM data section (`P2`/`P3`). Always false for PNG.
    pub textual: bool,
}

impl ImageHeader {
    /// Byte length of the sample data this header describes.
    pub fn data_len(&self) -> Result<usize, ImageIoError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(self.encoding.bytes_per_pixel()))
            .ok_or(ImageIoError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Bytes in one row of sample data.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.encoding.bytes_per_pixel()
    }

    /// Apply `limits` and return the buffer size to allocate.
    pub(crate) fn checked_len(&self, limits: Option<&Limits>) -> Result<usize, ImageIoError> {
        match limits {
            Some(limits) => limits.check(self),
            None => self.data_len(),
        }
    }
}

/// Owned sample data exactly `header.data_len()` bytes long.
///
/// 16-bit samples from binary sources keep the byte order of the stream.
/// Samples parsed from ASCII are stored in native byte order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawSamples {
    header: ImageHeader,
    data: Vec<u8>,
}

impl RawSamples {
    /// Wrap `data` after checking its length against `header`.
    pub fn new(header: ImageHeader, data: Vec<u8>) -> Result<Self, ImageIoError> {
        if !header.encoding.is_known() {
            return Err(ImageIoError::UnrecognizedFormat);
        }
        let needed = header.data_len()?;
        if data.len() != needed {
            return Err(ImageIoError::BufferTooSmall {
                needed,
                actual: data.len(),
            });
        }
        Ok(Self { header, data })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn encoding(&self) -> PixelEncoding {
        self.header.encoding
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// 16-bit samples read in native byte order.
    pub fn samples_u16(&self) -> impl Iterator<Item = u16> + '_ {
        self.data
            .chunks_exact(2)
            .map(|c| u16::from_ne_bytes([c[0], c[1]]))
    }

    /// 16-bit samples read in native byte order, as signed values.
    pub fn samples_i16(&self) -> impl Iterator<Item = i16> + '_ {
        self.data
            .chunks_exact(2)
            .map(|c| i16::from_ne_bytes([c[0], c[1]]))
    }
}
