//! Header sniffing for PNM and PNG streams.
//!
//! A successful sniff leaves the stream at the first sample byte.

use std::io::{BufRead, Seek, SeekFrom};

use enough::Stop;

use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::pixel::PixelEncoding;
use crate::png_bridge::PngSource;
use crate::pnm::PnmSource;
use crate::pnm::text::{IntToken, read_int, read_magic, skip_byte};
use crate::raw::{ImageHeader, RawSamples};
use crate::source::SampleSource;

/// Container a header was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    Pnm,
    Png,
}

/// Parse a PNM header: magic, width, height, maxval and one separator byte.
///
/// Returns [`ImageIoError::UnrecognizedFormat`] for a foreign magic (having
/// consumed only the token), unparsable or negative numbers, or a maxval the
/// magic does not allow.
pub fn read_pnm_header<R: BufRead + ?Sized>(reader: &mut R) -> Result<ImageHeader, ImageIoError> {
    let Some(magic) = read_magic(reader)? else {
        return Err(ImageIoError::UnrecognizedFormat);
    };
    let (gray, textual) = match magic.as_slice() {
        b"P5" => (true, false),
        b"P2" => (true, true),
        b"P6" => (false, false),
        b"P3" => (false, true),
        _ => return Err(ImageIoError::UnrecognizedFormat),
    };

    let width = read_dimension(reader)?;
    let height = read_dimension(reader)?;
    let IntToken::Value(maxval) = read_int(reader)? else {
        return Err(ImageIoError::UnrecognizedFormat);
    };

    let encoding = PixelEncoding::from_pnm(gray, maxval);
    if !encoding.is_known() {
        return Err(ImageIoError::UnrecognizedFormat);
    }
    skip_byte(reader)?;

    log::debug!(
        "pnm header {}x{} maxval {maxval} -> {encoding:?}{}",
        width,
        height,
        if textual { " (ascii)" } else { "" }
    );
    Ok(ImageHeader {
        encoding,
        width,
        height,
        textual,
    })
}

fn read_dimension<R: BufRead + ?Sized>(reader: &mut R) -> Result<u32, ImageIoError> {
    match read_int(reader)? {
        IntToken::Value(v) => u32::try_from(v).map_err(|_| ImageIoError::UnrecognizedFormat),
        IntToken::Eof | IntToken::Invalid => Err(ImageIoError::UnrecognizedFormat),
    }
}

/// A sniffed stream, ready for its data section to be read.
pub(crate) enum Sniffed<'r, R: BufRead> {
    Pnm(ImageHeader, PnmSource<&'r mut R>),
    Png(ImageHeader, PngSource<&'r mut R>),
}

impl<R: BufRead> Sniffed<'_, R> {
    pub(crate) fn header(&self) -> &ImageHeader {
        match self {
            Sniffed::Pnm(h, _) | Sniffed::Png(h, _) => h,
        }
    }

    pub(crate) fn container(&self) -> Container {
        match self {
            Sniffed::Pnm(..) => Container::Pnm,
            Sniffed::Png(..) => Container::Png,
        }
    }

    pub(crate) fn read_data(
        self,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError> {
        match self {
            Sniffed::Pnm(header, source) => source.read_data(&header, limits, stop),
            Sniffed::Png(header, source) => source.read_data(&header, limits, stop),
        }
    }
}

/// Sniff PNM first, then PNG from the same starting position.
///
/// A header whose encoding is not in `accept` counts as a miss. When both
/// containers miss, a recognized-but-refused encoding is reported as
/// [`ImageIoError::UnsupportedEncodingForTarget`] against `target`.
pub(crate) fn sniff<'r, R: BufRead + Seek>(
    reader: &'r mut R,
    accept: &[PixelEncoding],
    target: PixelEncoding,
) -> Result<Sniffed<'r, R>, ImageIoError> {
    let start = reader.stream_position()?;

    let pnm_miss = match read_pnm_header(reader) {
        Ok(header) if accept.contains(&header.encoding) => {
            return Ok(Sniffed::Pnm(header, PnmSource::new(reader)));
        }
        Ok(header) => Some(header.encoding),
        Err(ImageIoError::UnrecognizedFormat) => None,
        Err(e) => return Err(e),
    };

    reader.seek(SeekFrom::Start(start))?;
    log::debug!("no usable pnm header, trying png");

    let png_miss = match PngSource::open(reader) {
        Ok((header, source)) if accept.contains(&header.encoding) => {
            return Ok(Sniffed::Png(header, source));
        }
        Ok((header, _)) => Some(header.encoding),
        Err(ImageIoError::UnrecognizedFormat) => None,
        Err(e) if pnm_miss.is_none() => return Err(e),
        Err(_) => None,
    };

    match pnm_miss.or(png_miss) {
        Some(actual) => Err(ImageIoError::UnsupportedEncodingForTarget { target, actual }),
        None => Err(ImageIoError::UnrecognizedFormat),
    }
}

/// Every encoding a raw read accepts.
pub(crate) const ANY_ENCODING: &[PixelEncoding] = &[
    PixelEncoding::Gray8,
    PixelEncoding::Rgb8,
    PixelEncoding::Gray16Signed,
    PixelEncoding::Gray16Unsigned,
];

/// Classify a stream as PNM or PNG and return its header.
///
/// The stream is left at the first sample byte.
pub fn classify<R: BufRead + Seek>(reader: &mut R) -> Result<(ImageHeader, Container), ImageIoError> {
    let sniffed = sniff(reader, ANY_ENCODING, PixelEncoding::Unknown)?;
    Ok((*sniffed.header(), sniffed.container()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sniff_bytes(data: &[u8]) -> Result<ImageHeader, ImageIoError> {
        read_pnm_header(&mut Cursor::new(data))
    }

    #[test]
    fn binary_and_ascii_magics() {
        let cases: [(&[u8], PixelEncoding, bool); 4] = [
            (b"P5 3 2 255\n", PixelEncoding::Gray8, false),
            (b"P2 3 2 255\n", PixelEncoding::Gray8, true),
            (b"P6 3 2 255\n", PixelEncoding::Rgb8, false),
            (b"P3 3 2 255\n", PixelEncoding::Rgb8, true),
        ];
        for (data, encoding, textual) in cases {
            let header = sniff_bytes(data).unwrap();
            assert_eq!(header.encoding, encoding);
            assert_eq!(header.textual, textual);
            assert_eq!((header.width, header.height), (3, 2));
        }
    }

    #[test]
    fn maxval_promotion() {
        let header = sniff_bytes(b"P5\n1 1\n1000\n").unwrap();
        assert_eq!(header.encoding, PixelEncoding::Gray16Signed);
        let header = sniff_bytes(b"P5\n1 1\n65535\n").unwrap();
        assert_eq!(header.encoding, PixelEncoding::Gray16Unsigned);
        assert!(sniff_bytes(b"P5\n1 1\n65537\n").is_err());
        assert!(sniff_bytes(b"P6\n1 1\n1000\n").is_err());
    }

    #[test]
    fn consumes_exactly_one_separator() {
        let mut r = Cursor::new(&b"P5\n2 1\n255\n\n\x07"[..]);
        read_pnm_header(&mut r).unwrap();
        assert_eq!(r.position(), 11);
    }

    #[test]
    fn separator_consumed_even_if_not_whitespace() {
        let mut r = Cursor::new(&b"P5 2 1 255AB"[..]);
        read_pnm_header(&mut r).unwrap();
        assert_eq!(r.position(), 11);
    }

    #[test]
    fn foreign_magic_consumes_only_token() {
        let mut r = Cursor::new(&b"P7 WIDTH 2"[..]);
        assert!(matches!(
            read_pnm_header(&mut r),
            Err(ImageIoError::UnrecognizedFormat)
        ));
        assert_eq!(r.position(), 2);
    }

    #[test]
    fn malformed_headers() {
        for data in [
            &b""[..],
            b"P5",
            b"P5 x 2 255\n",
            b"P5 2 y 255\n",
            b"P5 2 2 z\n",
            b"P5 2 2 -1\n",
            b"P5 -2 2 255\n",
            b"\x89PNG\r\n\x1a\n",
            b" P5 2 2 255\n",
        ] {
            assert!(
                matches!(sniff_bytes(data), Err(ImageIoError::UnrecognizedFormat)),
                "{data:?}"
            );
        }
    }

    #[test]
    fn max_header_at_eof() {
        let header = sniff_bytes(b"P6 4 4 255").unwrap();
        assert_eq!(header.encoding, PixelEncoding::Rgb8);
    }

    #[test]
    fn classify_pnm() {
        let mut r = Cursor::new(b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06".to_vec());
        let (header, container) = classify(&mut r).unwrap();
        assert_eq!(container, Container::Pnm);
        assert_eq!(header.encoding, PixelEncoding::Rgb8);
        assert_eq!(r.position(), 11);
    }

    #[test]
    fn classify_garbage() {
        let mut r = Cursor::new(b"GIF89a".to_vec());
        assert!(matches!(
            classify(&mut r),
            Err(ImageIoError::UnrecognizedFormat)
        ));
        let mut r = Cursor::new(Vec::new());
        assert!(matches!(
            classify(&mut r),
            Err(ImageIoError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn refused_encoding_reported_against_target() {
        let mut r = Cursor::new(b"P5\n1 1\n255\n\x00".to_vec());
        let err = sniff(&mut r, &[PixelEncoding::Rgb8], PixelEncoding::Rgb8)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ImageIoError::UnsupportedEncodingForTarget {
                target: PixelEncoding::Rgb8,
                actual: PixelEncoding::Gray8
            }
        ));
    }
}
