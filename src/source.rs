use enough::Stop;

use crate::error::ImageIoError;
use crate::limits::Limits;
use crate::raw::{ImageHeader, RawSamples};

/// A stream whose header has been parsed and whose cursor sits at the first
/// sample. PNM and PNG sources are interchangeable from here on.
pub(crate) trait SampleSource {
    /// Read all samples described by `header`. Consumes the source.
    fn read_data(
        self,
        header: &ImageHeader,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<RawSamples, ImageIoError>;
}
