//! PNM family codec: P5/P2 (PGM) and P6/P3 (PPM).
//!
//! Reads binary and ASCII data sections; writes binary only.
//!
//! Credits: Header handling draws from [zune-ppm](https://github.com/etemesi254/zune-image)
//! by Caleb Etemesi (MIT/Apache-2.0/Zlib licensed).

mod decode;
mod encode;
pub(crate) mod text;

pub use decode::read_data;
pub use encode::{write_data, write_header};

pub(crate) use decode::read_data_limited;
pub(crate) use encode::write_data_with;

use std::io::BufRead;

use enough::Stop;

use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::raw::{ImageHeader, RawSamples};
use crate::source::SampleSource;

/// A PNM stream positioned at its data section.
pub(crate) struct PnmSource<R> {
    reader: R,
}

impl<R: BufRead> PnmSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SampleSource for PnmSource<R> {
    fn read_data(
        mut self,
        header: &ImageHeader,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError> {
        read_data_limited(&mut self.reader, header, limits, stop)
    }
}
