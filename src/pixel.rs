/// Sample layout of a stored image.
///
/// `Unknown` is what classification yields for anything this crate cannot
/// decode; it never reaches a codec.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelEncoding {
    /// Single channel, 8-bit grayscale.
    Gray8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// Single channel, signed 16-bit grayscale.
    Gray16Signed,
    /// Single channel, unsigned 16-bit grayscale.
    Gray16Unsigned,
    /// Not decodable.
    Unknown,
}

impl PixelEncoding {
    /// Number of channels (0 for `Unknown`).
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16Signed | Self::Gray16Unsigned => 1,
            Self::Rgb8 => 3,
            Self::Unknown => 0,
        }
    }

    /// Bytes per sample (0 for `Unknown`).
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            Self::Gray8 | Self::Rgb8 => 1,
            Self::Gray16Signed | Self::Gray16Unsigned => 2,
            Self::Unknown => 0,
        }
    }

    /// Bytes per pixel for this encoding.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() * self.bytes_per_sample()
    }

    /// True for 16-bit samples declared signed (maxval up to 32768).
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Gray16Signed)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Classify a PNM magic token and maxval.
    ///
    /// Grayscale promotes to 16 bits when maxval exceeds 256; RGB is 8-bit
    /// only.
    pub fn from_pnm(gray: bool, maxval: i64) -> Self {
        match maxval {
            ..0 => Self::Unknown,
            0..=256 if gray => Self::Gray8,
            0..=256 => Self::Rgb8,
            257..=32768 if gray => Self::Gray16Signed,
            32769..=65536 if gray => Self::Gray16Unsigned,
            _ => Self::Unknown,
        }
    }

    /// Binary PNM magic used when writing this encoding.
    pub(crate) fn write_magic(&self) -> Option<&'static str> {
        match self {
            Self::Gray8 | Self::Gray16Signed | Self::Gray16Unsigned => Some("P5"),
            Self::Rgb8 => Some("P6"),
            Self::Unknown => None,
        }
    }

    /// Maxval written in the PNM header for this encoding.
    ///
    /// Gray8 writes 256, which still reads back as Gray8.
    pub(crate) fn write_maxval(&self) -> Option<u32> {
        match self {
            Self::Gray8 => Some(256),
            Self::Rgb8 => Some(255),
            Self::Gray16Signed => Some(32767),
            Self::Gray16Unsigned => Some(65535),
            Self::Unknown => None,
        }
    }
}
