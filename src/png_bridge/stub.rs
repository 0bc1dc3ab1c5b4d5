use std::convert::Infallible;
use std::io::Read;
use std::marker::PhantomData;

use enough::Stop;

use super::read_signature;
use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::raw::{ImageHeader, RawSamples};
use crate::source::SampleSource;

/// Stand-in when built without the `png` feature. Cannot be constructed.
pub(crate) struct PngSource<R> {
    never: Infallible,
    _reader: PhantomData<R>,
}

impl<R: Read> PngSource<R> {
    pub(crate) fn open(mut inner: R) -> Result<(ImageHeader, Self), ImageIoError> {
        read_signature(&mut inner)?;
        log::debug!("png signature found but png support is not compiled in");
        Err(ImageIoError::UnrecognizedFormat)
    }
}

impl<R: Read> SampleSource for PngSource<R> {
    fn read_data(
        self,
        _header: &ImageHeader,
        _limits: Option<&Limits>,
        _stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError> {
        match self.never {}
    }
}
