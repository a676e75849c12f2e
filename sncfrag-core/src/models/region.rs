use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// Region struct, one masked region (typically one sncRNA precursor) in which
/// fragments are detected.
///
/// Coordinates are 0-based and inclusive on both ends.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub stop: u32,

    /// Display name, e.g. the `gene_id` of the precursor
    pub name: Option<String>,
    /// Position of the region in the file it was read from
    pub index: usize,
}

impl Region {
    pub fn new(chr: &str, start: u32, stop: u32) -> Region {
        Region {
            chr: chr.to_owned(),
            start,
            stop,
            name: None,
            index: 0,
        }
    }

    ///
    /// Number of bases covered by the region
    ///
    pub fn width(&self) -> u32 {
        self.stop - self.start + 1
    }

    ///
    /// Key used to look up annotations and links for this region.
    ///
    pub fn identifier(&self) -> &str {
        &self.chr
    }

    /// True if the inclusive interval `[start, stop]` shares at least one base with the region
    pub fn touches(&self, start: u32, stop: u32) -> bool {
        start <= self.stop && stop >= self.start
    }

    ///
    /// Get `chr:start-stop` string of the Region
    ///
    pub fn as_string(&self) -> String {
        format!("{}:{}-{}", self.chr, self.start, self.stop)
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
