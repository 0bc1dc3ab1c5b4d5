use std::io;

use enough::StopReason;

use crate::pixel::PixelEncoding;

/// Errors from sniffing, decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImageIoError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("cannot load {actual:?} into a {target:?} image")]
    UnsupportedEncodingForTarget {
        target: PixelEncoding,
        actual: PixelEncoding,
    },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("png decoder fault: {0}")]
    Png(String),

    #[error("i/o error: {0}")]
    Io(#[source] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<io::Error> for ImageIoError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => ImageIoError::UnexpectedEof,
            _ => ImageIoError::Io(e),
        }
    }
}

impl From<StopReason> for ImageIoError {
    fn from(r: StopReason) -> Self {
        ImageIoError::Cancelled(r)
    }
}

#[cfg(feature = "png")]
impl From<png::DecodingError> for ImageIoError {
    fn from(e: png::DecodingError) -> Self {
        match e {
            png::DecodingError::IoError(io) => io.into(),
            other => ImageIoError::Png(other.to_string()),
        }
    }
}
