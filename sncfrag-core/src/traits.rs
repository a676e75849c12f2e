use crate::errors::ReadSourceError;
use crate::models::{ReadInterval, Region};

///
/// Anything that can produce the reads aligned within a region.
///
/// Implementations must return intervals in the region's contig coordinates
/// (0-based, inclusive). They are shared between worker threads, so any file
/// handle should be opened per call.
///
pub trait ReadSource: Send + Sync {
    fn fetch(&self, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError>;
}

impl<T: ReadSource + ?Sized> ReadSource for Box<T> {
    fn fetch(&self, region: &Region) -> Result<Vec<ReadInterval>, ReadSourceError> {
        (**self).fetch(region)
    }
}
