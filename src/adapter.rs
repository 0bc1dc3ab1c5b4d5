//! Conversions between raw sample buffers and typed images.

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

use crate::error::ImageIoError;
use crate::pixel::PixelEncoding;
use crate::raw::RawSamples;

/// Scale applied to float samples before narrowing to 16 bits.
pub const FLOAT_SCALE: f32 = 1000.0;

/// Swap the high and low byte of a 16-bit depth sample.
///
/// Depth images are stored with the opposite byte order from memory. The
/// swap is its own inverse.
#[inline]
pub fn swap_sample_bytes(v: i16) -> i16 {
    v.swap_bytes()
}

/// Quantize a float sample to 16 bits: `trunc(v * 1000)` for `v >= 0`,
/// otherwise 0.
///
/// There is no upper clamp. Products past 65535 wrap modulo 2^16, so
/// `65.536` stores as `0`. Consumers rely on these exact values.
#[inline]
pub fn quantize_float(v: f32) -> u16 {
    if v >= 0.0 {
        (v * FLOAT_SCALE) as i64 as u16
    } else {
        0
    }
}

pub(crate) fn dimensions<P>(img: ImgRef<'_, P>) -> Result<(u32, u32), ImageIoError> {
    match (u32::try_from(img.width()), u32::try_from(img.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ImageIoError::DimensionsTooLarge {
            width: saturate(img.width()),
            height: saturate(img.height()),
        }),
    }
}

fn saturate(v: usize) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

/// Packed RGB bytes with alpha dropped, optionally bottom row first.
pub(crate) fn rgba_to_rgb_bytes(img: ImgRef<'_, RGBA8>, flip_vertical: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() * img.height() * 3);
    let mut rows: Vec<&[RGBA8]> = img.rows().collect();
    if flip_vertical {
        rows.reverse();
    }
    for row in rows {
        for px in row {
            out.extend_from_slice(&[px.r, px.g, px.b]);
        }
    }
    out
}

/// Byte-swapped depth samples in native order, ready for a Gray16 dump.
pub(crate) fn depth_to_bytes(img: ImgRef<'_, i16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() * img.height() * 2);
    for row in img.rows() {
        for &v in row {
            out.extend_from_slice(&swap_sample_bytes(v).to_ne_bytes());
        }
    }
    out
}

/// Quantized float samples in native order.
pub(crate) fn float_to_bytes(img: ImgRef<'_, f32>) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.width() * img.height() * 2);
    for row in img.rows() {
        for &v in row {
            out.extend_from_slice(&quantize_float(v).to_ne_bytes());
        }
    }
    out
}

fn image_dims(raw: &RawSamples) -> Result<(usize, usize), ImageIoError> {
    if raw.width() == 0 {
        return Err(ImageIoError::InvalidData(
            "zero-width image cannot be stored in an image buffer".into(),
        ));
    }
    Ok((raw.width() as usize, raw.height() as usize))
}

/// Expand RGB samples to RGBA with opaque alpha.
pub(crate) fn rgb_to_rgba(raw: &RawSamples) -> Result<ImgVec<RGBA8>, ImageIoError> {
    if raw.encoding() != PixelEncoding::Rgb8 {
        return Err(ImageIoError::UnsupportedEncodingForTarget {
            target: PixelEncoding::Rgb8,
            actual: raw.encoding(),
        });
    }
    let (w, h) = image_dims(raw)?;
    let pixels = raw
        .as_bytes()
        .chunks_exact(3)
        .map(|c| RGBA8::new(c[0], c[1], c[2], 255))
        .collect();
    Ok(ImgVec::new(pixels, w, h))
}

/// Gray16 samples into a depth image.
///
/// Binary sources are byte-swapped; samples parsed from ASCII are copied as
/// they are.
pub(crate) fn gray16_to_depth(raw: &RawSamples) -> Result<ImgVec<i16>, ImageIoError> {
    if !matches!(
        raw.encoding(),
        PixelEncoding::Gray16Signed | PixelEncoding::Gray16Unsigned
    ) {
        return Err(ImageIoError::UnsupportedEncodingForTarget {
            target: PixelEncoding::Gray16Signed,
            actual: raw.encoding(),
        });
    }
    let (w, h) = image_dims(raw)?;
    if !raw.encoding().is_signed() {
        log::trace!("reinterpreting unsigned 16-bit samples as i16 depth");
    }
    let swap = !raw.header().textual;
    let pixels = raw
        .samples_i16()
        .map(|v| if swap { swap_sample_bytes(v) } else { v })
        .collect();
    Ok(ImgVec::new(pixels, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::ImageHeader;

    fn raw(encoding: PixelEncoding, width: u32, height: u32, textual: bool, data: Vec<u8>) -> RawSamples {
        let header = ImageHeader {
            encoding,
            width,
            height,
            textual,
        };
        RawSamples::new(header, data).unwrap()
    }

    #[test]
    fn quantization_table() {
        assert_eq!(quantize_float(-1.0), 0);
        assert_eq!(quantize_float(0.0), 0);
        assert_eq!(quantize_float(1.0), 1000);
        assert_eq!(quantize_float(0.0015), 1);
        assert_eq!(quantize_float(65.535), 65535);
        assert_eq!(quantize_float(f32::NAN), 0);
    }

    #[test]
    fn quantization_wraps_past_16_bits() {
        assert_eq!(quantize_float(65.536), 0);
        assert_eq!(quantize_float(66.0), 464);
    }

    #[test]
    fn swap_is_self_inverse() {
        for v in i16::MIN..=i16::MAX {
            assert_eq!(swap_sample_bytes(swap_sample_bytes(v)), v);
        }
        assert_eq!(swap_sample_bytes(0x1234), 0x3412);
    }

    #[test]
    fn rgb_drop_alpha_and_flip() {
        let img = ImgVec::new(
            vec![
                RGBA8::new(1, 2, 3, 9),
                RGBA8::new(4, 5, 6, 9),
                RGBA8::new(7, 8, 9, 9),
                RGBA8::new(10, 11, 12, 9),
            ],
            2,
            2,
        );
        assert_eq!(
            rgba_to_rgb_bytes(img.as_ref(), false),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );
        assert_eq!(
            rgba_to_rgb_bytes(img.as_ref(), true),
            vec![7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn strided_source_rows() {
        let buf = vec![
            RGBA8::new(1, 1, 1, 0),
            RGBA8::new(99, 99, 99, 0),
            RGBA8::new(2, 2, 2, 0),
            RGBA8::new(99, 99, 99, 0),
        ];
        let img = ImgVec::new_stride(buf, 1, 2, 2);
        assert_eq!(rgba_to_rgb_bytes(img.as_ref(), false), vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn rgb_expands_with_opaque_alpha() {
        let img = rgb_to_rgba(&raw(PixelEncoding::Rgb8, 2, 1, false, vec![10, 20, 30, 40, 50, 60]))
            .unwrap();
        assert_eq!(
            img.buf().as_slice(),
            &[RGBA8::new(10, 20, 30, 255), RGBA8::new(40, 50, 60, 255)]
        );
    }

    #[test]
    fn depth_swap_depends_on_source() {
        let bytes = 0x0102i16.to_ne_bytes().to_vec();
        let binary = gray16_to_depth(&raw(PixelEncoding::Gray16Unsigned, 1, 1, false, bytes.clone()))
            .unwrap();
        assert_eq!(binary.buf()[0], 0x0201);
        let ascii = gray16_to_depth(&raw(PixelEncoding::Gray16Signed, 1, 1, true, bytes)).unwrap();
        assert_eq!(ascii.buf()[0], 0x0102);
    }

    #[test]
    fn depth_bytes_roundtrip_through_load() {
        let img = ImgVec::new(vec![-5i16, 0, 300, i16::MAX], 2, 2);
        let bytes = depth_to_bytes(img.as_ref());
        let back = gray16_to_depth(&raw(PixelEncoding::Gray16Unsigned, 2, 2, false, bytes)).unwrap();
        assert_eq!(back.buf(), img.buf());
    }

    #[test]
    fn wrong_encoding_for_target() {
        let gray = raw(PixelEncoding::Gray8, 1, 1, false, vec![0]);
        assert!(matches!(
            rgb_to_rgba(&gray),
            Err(ImageIoError::UnsupportedEncodingForTarget { .. })
        ));
        assert!(matches!(
            gray16_to_depth(&gray),
            Err(ImageIoError::UnsupportedEncodingForTarget { .. })
        ));
    }

    #[test]
    fn oversized_axis_saturates_alone() {
        assert_eq!(saturate(7), 7);
        assert_eq!(saturate(u32::MAX as usize), u32::MAX);
        assert_eq!(saturate(usize::MAX), u32::MAX);
    }

    #[test]
    fn zero_width_refused() {
        let empty = raw(PixelEncoding::Rgb8, 0, 3, false, Vec::new());
        assert!(matches!(rgb_to_rgba(&empty), Err(ImageIoError::InvalidData(_))));
    }
}
