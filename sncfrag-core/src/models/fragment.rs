#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// A fragment called by the peak detection, in absolute 0-based inclusive
/// contig coordinates.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictedFragment {
    pub start: u32,
    pub stop: u32,
    /// Read 5' boundaries at `start`
    pub supporting_reads_start: u32,
    /// Read 3' boundaries at `stop`
    pub supporting_reads_stop: u32,
    /// Reads overlapping `[start, stop]`
    pub supporting_reads: u32,
}

impl PredictedFragment {
    pub fn width(&self) -> u32 {
        self.stop - self.start + 1
    }
}
