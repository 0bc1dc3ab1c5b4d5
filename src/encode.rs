use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use enough::Stop;
use imgref::ImgRef;
use rgb::RGBA8;

use crate::adapter;
use crate::error::ImageIoError;
use crate::pixel::PixelEncoding;
use crate::pnm;
use crate::raw::RawSamples;

/// Builder for saving images as binary PNM.
///
/// RGBA images become P6; depth (`i16`) and float images become 16-bit P5.
#[derive(Clone, Copy, Debug, Default)]
pub struct SaveRequest {
    flip_vertical: bool,
}

impl SaveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write RGBA rows bottom to top. Other image types ignore this.
    pub fn flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }

    /// Write an RGBA image as P6, dropping alpha.
    pub fn write_rgba8<W: Write>(
        &self,
        writer: &mut W,
        img: ImgRef<'_, RGBA8>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        let (width, height) = adapter::dimensions(img)?;
        let bytes = adapter::rgba_to_rgb_bytes(img, self.flip_vertical);
        write_pnm(writer, width, height, PixelEncoding::Rgb8, &bytes, &stop)
    }

    /// Write a depth image as 16-bit P5 with each sample byte-swapped.
    pub fn write_depth_i16<W: Write>(
        &self,
        writer: &mut W,
        img: ImgRef<'_, i16>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        let (width, height) = adapter::dimensions(img)?;
        let bytes = adapter::depth_to_bytes(img);
        write_pnm(writer, width, height, PixelEncoding::Gray16Unsigned, &bytes, &stop)
    }

    /// Write a float image as 16-bit P5 via [`quantize_float`](crate::quantize_float).
    pub fn write_f32<W: Write>(
        &self,
        writer: &mut W,
        img: ImgRef<'_, f32>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        let (width, height) = adapter::dimensions(img)?;
        let bytes = adapter::float_to_bytes(img);
        write_pnm(writer, width, height, PixelEncoding::Gray16Unsigned, &bytes, &stop)
    }

    /// Write raw samples unchanged under their own encoding.
    pub fn write_raw<W: Write>(
        &self,
        writer: &mut W,
        raw: &RawSamples,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        write_pnm(
            writer,
            raw.width(),
            raw.height(),
            raw.encoding(),
            raw.as_bytes(),
            &stop,
        )
    }

    pub fn save_rgba8(
        &self,
        path: impl AsRef<Path>,
        img: ImgRef<'_, RGBA8>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        save_with(path.as_ref(), |w| self.write_rgba8(w, img, stop))
    }

    pub fn save_depth_i16(
        &self,
        path: impl AsRef<Path>,
        img: ImgRef<'_, i16>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        save_with(path.as_ref(), |w| self.write_depth_i16(w, img, stop))
    }

    pub fn save_f32(
        &self,
        path: impl AsRef<Path>,
        img: ImgRef<'_, f32>,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        save_with(path.as_ref(), |w| self.write_f32(w, img, stop))
    }

    pub fn save_raw(
        &self,
        path: impl AsRef<Path>,
        raw: &RawSamples,
        stop: impl Stop,
    ) -> Result<(), ImageIoError> {
        save_with(path.as_ref(), |w| self.write_raw(w, raw, stop))
    }
}

fn write_pnm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    bytes: &[u8],
    stop: &dyn Stop,
) -> Result<(), ImageIoError> {
    stop.check()?;
    log::trace!("writing {width}x{height} {encoding:?}");
    pnm::write_header(writer, width, height, encoding)?;
    pnm::write_data_with(writer, width, height, encoding, bytes, stop)
}

fn save_with(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<(), ImageIoError>,
) -> Result<(), ImageIoError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;
    use imgref::ImgVec;

    #[test]
    fn rgb_file_bytes() {
        let img = ImgVec::new(
            vec![RGBA8::new(10, 20, 30, 0), RGBA8::new(40, 50, 60, 7)],
            2,
            1,
        );
        let mut out = Vec::new();
        SaveRequest::new()
            .write_rgba8(&mut out, img.as_ref(), Unstoppable)
            .unwrap();
        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[0x0A, 0x14, 0x1E, 0x28, 0x32, 0x3C]);
        assert_eq!(out, expected);
    }

    #[test]
    fn depth_file_is_swapped() {
        let img = ImgVec::new(vec![0x0102i16], 1, 1);
        let mut out = Vec::new();
        SaveRequest::new()
            .write_depth_i16(&mut out, img.as_ref(), Unstoppable)
            .unwrap();
        let mut expected = b"P5\n1 1\n65535\n".to_vec();
        expected.extend_from_slice(&0x0201i16.to_ne_bytes());
        assert_eq!(out, expected);
    }

    #[test]
    fn float_file_is_quantized() {
        let img = ImgVec::new(vec![1.0f32, -3.0, 65.536], 3, 1);
        let mut out = Vec::new();
        SaveRequest::new()
            .write_f32(&mut out, img.as_ref(), Unstoppable)
            .unwrap();
        let mut expected = b"P5\n3 1\n65535\n".to_vec();
        for v in [1000u16, 0, 0] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(out, expected);
    }

    #[test]
    fn flip_only_for_rgba() {
        let img = ImgVec::new(vec![7i16, 8], 1, 2);
        let mut plain = Vec::new();
        let mut flipped = Vec::new();
        SaveRequest::new()
            .write_depth_i16(&mut plain, img.as_ref(), Unstoppable)
            .unwrap();
        SaveRequest::new()
            .flip_vertical(true)
            .write_depth_i16(&mut flipped, img.as_ref(), Unstoppable)
            .unwrap();
        assert_eq!(plain, flipped);
    }
}
