use crate::error::ImageIoError;
use crate::raw::ImageHeader;

/// Caps applied to a sniffed header before its samples are read.
///
/// All fields default to `None` (no limit). Loads without limits still never
/// allocate ahead of the data that actually arrives for PNM input.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the raw sample buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check a header and return the sample buffer length it needs.
    pub(crate) fn check(&self, header: &ImageHeader) -> Result<usize, ImageIoError> {
        let ImageHeader {
            encoding,
            width,
            height,
            ..
        } = *header;
        let exceeded = |what: &str, actual: u64, max: u64| {
            ImageIoError::LimitExceeded(format!(
                "{what} {actual} exceeds limit {max} ({width}x{height} {encoding:?})"
            ))
        };

        if let Some(max) = self.max_width
            && u64::from(width) > max
        {
            return Err(exceeded("width", width.into(), max));
        }
        if let Some(max) = self.max_height
            && u64::from(height) > max
        {
            return Err(exceeded("height", height.into(), max));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max) = self.max_pixels
            && pixels > max
        {
            return Err(exceeded("pixel count", pixels, max));
        }

        let len = header.data_len()?;
        if let Some(max) = self.max_memory_bytes
            && len as u64 > max
        {
            return Err(exceeded("sample buffer bytes", len as u64, max));
        }
        Ok(len)
    }
}
