#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// One aligned read reduced to its genomic interval.
///
/// `start` and `stop` are 0-based, inclusive contig coordinates of the
/// 5' and 3' boundaries of the alignment.
///
#[derive(Eq, PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadInterval {
    pub start: u32,
    pub stop: u32,
    pub name: Option<String>,
    pub sequence: Option<String>,

    /// Number of identical reads this record stands for
    pub multiplicity: u32,
}

impl ReadInterval {
    pub fn new(start: u32, stop: u32) -> ReadInterval {
        ReadInterval {
            start,
            stop,
            name: None,
            sequence: None,
            multiplicity: 1,
        }
    }

    pub fn with_name(mut self, name: &str) -> ReadInterval {
        self.name = Some(name.to_owned());
        self
    }

    pub fn with_sequence(mut self, sequence: &str) -> ReadInterval {
        self.sequence = Some(sequence.to_owned());
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: u32) -> ReadInterval {
        self.multiplicity = multiplicity;
        self
    }

    pub fn width(&self) -> u32 {
        self.stop.saturating_sub(self.start) + 1
    }

    /// Check if the read shares at least one base with the inclusive interval `[start, stop]`
    #[inline]
    pub fn overlaps(&self, start: u32, stop: u32) -> bool {
        self.start <= stop && self.stop >= start
    }
}
