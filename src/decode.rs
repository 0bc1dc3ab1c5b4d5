use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use enough::Stop;
use imgref::ImgVec;
use rgb::RGBA8;

use crate::adapter;
use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::pixel::PixelEncoding;
use crate::raw::RawSamples;
use crate::sniff::{self, ANY_ENCODING};

const RGBA_SOURCES: &[PixelEncoding] = &[PixelEncoding::Rgb8];
const DEPTH_SOURCES: &[PixelEncoding] = &[PixelEncoding::Gray16Signed, PixelEncoding::Gray16Unsigned];

/// Builder for loading PNM (P2/P3/P5/P6) or PNG images.
///
/// Streams are sniffed as PNM first, then as PNG from the same position.
///
/// ```no_run
/// use zenframeio::{LoadRequest, Unstoppable};
///
/// let frame = LoadRequest::new().load_rgba8("frame.ppm", Unstoppable)?;
/// println!("{}x{}", frame.width(), frame.height());
/// # Ok::<(), zenframeio::ImageIoError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> LoadRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject images exceeding `limits` before allocating sample storage.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Read samples of any supported encoding.
    pub fn read_raw<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        stop: impl Stop,
    ) -> Result<RawSamples, ImageIoError> {
        self.read_accepting(reader, ANY_ENCODING, PixelEncoding::Unknown, &stop)
    }

    /// Read an RGB image into RGBA with alpha 255.
    pub fn read_rgba8<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        stop: impl Stop,
    ) -> Result<ImgVec<RGBA8>, ImageIoError> {
        let raw = self.read_accepting(reader, RGBA_SOURCES, PixelEncoding::Rgb8, &stop)?;
        adapter::rgb_to_rgba(&raw)
    }

    /// Read a 16-bit grayscale image as depth samples.
    ///
    /// Binary data is byte-swapped on the way in, mirroring
    /// [`SaveRequest::write_depth_i16`](crate::SaveRequest::write_depth_i16).
    /// ASCII data is taken as written.
    pub fn read_depth_i16<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        stop: impl Stop,
    ) -> Result<ImgVec<i16>, ImageIoError> {
        let raw = self.read_accepting(reader, DEPTH_SOURCES, PixelEncoding::Gray16Signed, &stop)?;
        adapter::gray16_to_depth(&raw)
    }

    /// Like [`read_rgba8`](Self::read_rgba8); `dst` is replaced only on success.
    pub fn read_rgba8_into<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        dst: &mut ImgVec<RGBA8>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        *dst = self.read_rgba8(reader, stop)?;
        Ok(())
    }

    /// Like [`read_depth_i16`](Self::read_depth_i16); `dst` is replaced only on success.
    pub fn read_depth_i16_into<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        dst: &mut ImgVec<i16>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        *dst = self.read_depth_i16(reader, stop)?;
        Ok(())
    }

    pub fn load_raw(&self, path: impl AsRef<Path>, stop: impl Stop) -> Result<RawSamples, ImageIoError> {
        self.read_raw(&mut open(path.as_ref())?, stop)
    }

    pub fn load_rgba8(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<ImgVec<RGBA8>, ImageIoError> {
        self.read_rgba8(&mut open(path.as_ref())?, stop)
    }

    pub fn load_depth_i16(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<ImgVec<i16>, ImageIoError> {
        self.read_depth_i16(&mut open(path.as_ref())?, stop)
    }

    pub fn load_rgba8_into(
        &self,
        path: impl AsRef<Path>,
        dst: &mut ImgVec<RGBA8>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        self.read_rgba8_into(&mut open(path.as_ref())?, dst, stop)
    }

    pub fn load_depth_i16_into(
        &self,
        path: impl AsRef<Path>,
        dst: &mut ImgVec<i16>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        self.read_depth_i16_into(&mut open(path.as_ref())?, dst, stop)
    }

    fn read_accepting<R: BufRead + Seek>(
        &self,
        reader: &mut R,
        accept: &[PixelEncoding],
        target: PixelEncoding,
        stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError> {
        stop.check()?;
        let sniffed = sniff::sniff(reader, accept, target)?;
        sniffed.read_data(self.limits, stop)
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ImageIoError> {
    Ok(BufReader::new(File::open(path)?))
}
