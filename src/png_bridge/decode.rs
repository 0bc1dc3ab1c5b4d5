use std::io::{Chain, Cursor, Read};

use enough::Stop;

use super::read_signature;
use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::pixel::PixelEncoding;
use crate::raw::{ImageHeader, RawSamples};
use crate::source::SampleSource;

/// A PNG stream whose header chunk has been parsed.
pub(crate) struct PngSource<R: Read> {
    reader: png::Reader<Chain<Cursor<[u8; 8]>, R>>,
}

/// Map a PNG colour type and bit depth onto the encodings this crate loads.
///
/// Sub-byte gray, 16-bit RGB, palettes and anything with alpha are refused.
pub(crate) fn encoding_for(color: png::ColorType, depth: png::BitDepth) -> PixelEncoding {
    match (color, depth) {
        (png::ColorType::Grayscale, png::BitDepth::Eight) => PixelEncoding::Gray8,
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => PixelEncoding::Gray16Unsigned,
        (png::ColorType::Rgb, png::BitDepth::Eight) => PixelEncoding::Rgb8,
        _ => PixelEncoding::Unknown,
    }
}

impl<R: Read> PngSource<R> {
    /// Check the signature and parse the header chunk.
    pub(crate) fn open(mut inner: R) -> Result<(ImageHeader, Self), ImageIoError> {
        let signature = read_signature(&mut inner)?;

        // The decoder validates the signature itself, so hand it back.
        let mut decoder = png::Decoder::new(Cursor::new(signature).chain(inner));
        // Keep 16-bit samples big-endian and unexpanded, as stored.
        decoder.set_transformations(png::Transformations::IDENTITY);
        let reader = decoder.read_info()?;

        let info = reader.info();
        let encoding = encoding_for(info.color_type, info.bit_depth);
        log::trace!(
            "png header {}x{} {:?}/{:?} -> {:?}",
            info.width,
            info.height,
            info.color_type,
            info.bit_depth,
            encoding
        );
        if !encoding.is_known() {
            return Err(ImageIoError::UnrecognizedFormat);
        }
        let header = ImageHeader {
            encoding,
            width: info.width,
            height: info.height,
            textual: false,
        };
        Ok((header, Self { reader }))
    }
}

impl<R: Read> SampleSource for PngSource<R> {
    fn read_data(
        mut self,
        header: &ImageHeader,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError> {
        let len = header.checked_len(limits)?;
        stop.check()?;

        let size = self.reader.output_buffer_size();
        let mut frame = Vec::new();
        frame.try_reserve_exact(size).map_err(|_| {
            ImageIoError::LimitExceeded(format!("cannot allocate {size} bytes for png frame"))
        })?;
        frame.resize(size, 0);
        let output = self.reader.next_frame(&mut frame)?;
        if output.line_size != header.row_len() {
            return Err(ImageIoError::InvalidData(format!(
                "png row stride {} does not match {} expected bytes",
                output.line_size,
                header.row_len()
            )));
        }
        if frame.len() < len {
            return Err(ImageIoError::UnexpectedEof);
        }
        frame.truncate(len);

        stop.check()?;
        self.reader.finish()?;

        RawSamples::new(*header, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    fn encode_png(
        width: u32,
        height: u32,
        color: png::ColorType,
        depth: png::BitDepth,
        data: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(depth);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    #[test]
    fn accepted_combinations() {
        use png::{BitDepth, ColorType};
        assert_eq!(encoding_for(ColorType::Grayscale, BitDepth::Eight), PixelEncoding::Gray8);
        assert_eq!(
            encoding_for(ColorType::Grayscale, BitDepth::Sixteen),
            PixelEncoding::Gray16Unsigned
        );
        assert_eq!(encoding_for(ColorType::Rgb, BitDepth::Eight), PixelEncoding::Rgb8);
    }

    #[test]
    fn refused_combinations() {
        use png::{BitDepth, ColorType};
        for depth in [BitDepth::One, BitDepth::Two, BitDepth::Four] {
            assert_eq!(encoding_for(ColorType::Grayscale, depth), PixelEncoding::Unknown);
        }
        assert_eq!(encoding_for(ColorType::Rgb, BitDepth::Sixteen), PixelEncoding::Unknown);
        assert_eq!(encoding_for(ColorType::Rgba, BitDepth::Eight), PixelEncoding::Unknown);
        assert_eq!(encoding_for(ColorType::GrayscaleAlpha, BitDepth::Eight), PixelEncoding::Unknown);
        assert_eq!(encoding_for(ColorType::Indexed, BitDepth::Eight), PixelEncoding::Unknown);
    }

    #[test]
    fn rgb8_rows() {
        let pixels = [10u8, 20, 30, 40, 50, 60, 1, 2, 3, 4, 5, 6];
        let bytes = encode_png(2, 2, png::ColorType::Rgb, png::BitDepth::Eight, &pixels);
        let (header, source) = PngSource::open(Cursor::new(bytes)).unwrap();
        assert_eq!(header.encoding, PixelEncoding::Rgb8);
        assert_eq!((header.width, header.height), (2, 2));
        assert!(!header.textual);
        let raw = source.read_data(&header, None, &Unstoppable).unwrap();
        assert_eq!(raw.as_bytes(), &pixels);
    }

    #[test]
    fn gray16_stays_big_endian() {
        let pixels = [0x12u8, 0x34, 0xAB, 0xCD];
        let bytes = encode_png(2, 1, png::ColorType::Grayscale, png::BitDepth::Sixteen, &pixels);
        let (header, source) = PngSource::open(Cursor::new(bytes)).unwrap();
        assert_eq!(header.encoding, PixelEncoding::Gray16Unsigned);
        let raw = source.read_data(&header, None, &Unstoppable).unwrap();
        assert_eq!(raw.as_bytes(), &pixels);
    }

    #[test]
    fn rgba_refused() {
        let bytes = encode_png(1, 1, png::ColorType::Rgba, png::BitDepth::Eight, &[1, 2, 3, 4]);
        assert!(matches!(
            PngSource::open(Cursor::new(bytes)),
            Err(ImageIoError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn truncated_stream_faults() {
        let pixels: Vec<u8> = (0..32 * 32 * 3).map(|i| (i * 37 % 251) as u8).collect();
        let mut bytes = encode_png(32, 32, png::ColorType::Rgb, png::BitDepth::Eight, &pixels);
        bytes.truncate(bytes.len() / 2);
        let result = PngSource::open(Cursor::new(bytes))
            .and_then(|(header, source)| source.read_data(&header, None, &Unstoppable));
        assert!(result.is_err());
    }

    #[test]
    fn limits_apply() {
        let bytes = encode_png(4, 4, png::ColorType::Grayscale, png::BitDepth::Eight, &[0; 16]);
        let (header, source) = PngSource::open(Cursor::new(bytes)).unwrap();
        let limits = Limits {
            max_width: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            source.read_data(&header, Some(&limits), &Unstoppable),
            Err(ImageIoError::LimitExceeded(_))
        ));
    }
}
