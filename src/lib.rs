//! # zenframeio
//!
//! Persistence for reconstruction-pipeline frames: RGB images, 16-bit depth
//! maps and float confidence maps, stored as PNM and read back from PNM or
//! PNG.
//!
//! ## Formats
//!
//! ### Read
//! - **P5 / P2** (PGM binary / ASCII). maxval ≤ 256 is 8-bit, ≤ 32768 is
//!   signed 16-bit, ≤ 65536 is unsigned 16-bit.
//! - **P6 / P3** (PPM binary / ASCII), 8-bit only.
//! - **PNG** (`png` feature): 8/16-bit grayscale and 8-bit RGB.
//!
//! ### Write
//! - Binary P5/P6 only.
//!
//! ## Image types
//!
//! | image | saved as | loaded from |
//! |---|---|---|
//! | `ImgVec<RGBA8>` | P6, alpha dropped | RGB8, alpha set to 255 |
//! | `ImgVec<i16>` | 16-bit P5, bytes swapped | any 16-bit gray |
//! | `ImgVec<f32>` | 16-bit P5, `trunc(v * 1000)` | not supported |
//!
//! Float quantization does not clamp: values above 65.535 wrap modulo 2^16.
//!
//! ## Non-Goals
//!
//! - PNG encoding
//! - Colour management
//! - Animated or multi-frame formats
//!
//! ## Usage
//!
//! ```no_run
//! use zenframeio::{LoadRequest, SaveRequest, Unstoppable};
//! use imgref::ImgVec;
//! use rgb::RGBA8;
//!
//! let frame = ImgVec::new(vec![RGBA8::new(10, 20, 30, 255); 4], 2, 2);
//! SaveRequest::new()
//!     .flip_vertical(true)
//!     .save_rgba8("frame.ppm", frame.as_ref(), Unstoppable)?;
//!
//! let back = LoadRequest::new().load_rgba8("frame.ppm", Unstoppable)?;
//! assert_eq!(back.width(), 2);
//! # Ok::<(), zenframeio::ImageIoError>(())
//! ```

#![forbid(unsafe_code)]

mod adapter;
mod decode;
mod encode;
mod error;
mod info;
mod limits;
mod pixel;
mod png_bridge;
pub mod pnm;
mod raw;
pub mod sniff;
mod source;

// Re-exports
pub use adapter::{FLOAT_SCALE, quantize_float, swap_sample_bytes};
pub use decode::LoadRequest;
pub use encode::SaveRequest;
pub use enough::{Stop, Unstoppable};
pub use error::ImageIoError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::PixelEncoding;
pub use raw::{ImageHeader, RawSamples};
pub use sniff::Container;

use std::path::Path;

use imgref::{ImgRef, ImgVec};
use rgb::RGBA8;

/// Save an RGBA image as P6. `flip_vertical` writes the bottom row first.
pub fn save_rgba8(
    path: impl AsRef<Path>,
    img: ImgRef<'_, RGBA8>,
    flip_vertical: bool,
) -> Result<(), ImageIoError> {
    SaveRequest::new()
        .flip_vertical(flip_vertical)
        .save_rgba8(path, img, Unstoppable)
}

/// Save a depth image as byte-swapped 16-bit P5.
pub fn save_depth_i16(path: impl AsRef<Path>, img: ImgRef<'_, i16>) -> Result<(), ImageIoError> {
    SaveRequest::new().save_depth_i16(path, img, Unstoppable)
}

/// Save a float image as 16-bit P5 via [`quantize_float`].
pub fn save_f32(path: impl AsRef<Path>, img: ImgRef<'_, f32>) -> Result<(), ImageIoError> {
    SaveRequest::new().save_f32(path, img, Unstoppable)
}

/// Load an RGB PNM or PNG into RGBA.
pub fn load_rgba8(path: impl AsRef<Path>) -> Result<ImgVec<RGBA8>, ImageIoError> {
    LoadRequest::new().load_rgba8(path, Unstoppable)
}

/// Load a 16-bit grayscale PNM or PNG as depth samples.
pub fn load_depth_i16(path: impl AsRef<Path>) -> Result<ImgVec<i16>, ImageIoError> {
    LoadRequest::new().load_depth_i16(path, Unstoppable)
}
