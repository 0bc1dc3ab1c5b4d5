use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use crate::error::ImageIoError;
use crate::pixel::PixelEncoding;
use crate::sniff::{self, Container};

/// Header facts about an image, read without touching sample data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub encoding: PixelEncoding,
    pub container: Container,
    /// ASCII PNM data section.
    pub textual: bool,
}

impl ImageInfo {
    /// Sniff a stream. The stream is left at the first sample byte.
    pub fn probe<R: BufRead + Seek>(reader: &mut R) -> Result<Self, ImageIoError> {
        let (header, container) = sniff::classify(reader)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            encoding: header.encoding,
            container,
            textual: header.textual,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageIoError> {
        Self::probe(&mut BufReader::new(File::open(path)?))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageIoError> {
        Self::probe(&mut std::io::Cursor::new(data))
    }
}
