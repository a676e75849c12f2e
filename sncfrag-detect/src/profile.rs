use sncfrag_core::models::{ReadInterval, Region};

///
/// Per-position counts of read 5' (start) and 3' (stop) boundaries over one region.
///
/// Index `p` of either vector refers to contig position `region.start + p`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityProfile {
    pub start_counts: Vec<u32>,
    pub stop_counts: Vec<u32>,
}

impl DensityProfile {
    /// An all-zero profile, which is what a region without reads looks like.
    pub fn empty(length: usize) -> DensityProfile {
        DensityProfile {
            start_counts: vec![0; length],
            stop_counts: vec![0; length],
        }
    }

    ///
    /// Accumulate the boundaries of `reads` over `region`.
    ///
    /// Every read touching the region adds its multiplicity once to `start_counts` and once
    /// to `stop_counts`, at its boundary positions clamped into the region. Reads that do not
    /// touch the region are skipped.
    ///
    pub fn from_reads(region: &Region, reads: &[ReadInterval]) -> DensityProfile {
        let length = region.width() as usize;
        let mut profile = DensityProfile::empty(length);
        let last = length - 1;

        for read in reads {
            if read.stop < read.start || !region.touches(read.start, read.stop) {
                continue;
            }

            let start = (read.start.saturating_sub(region.start) as usize).min(last);
            let stop = (read.stop.saturating_sub(region.start) as usize).min(last);

            // huge BED count columns saturate
            profile.start_counts[start] = profile.start_counts[start].saturating_add(read.multiplicity);
            profile.stop_counts[stop] = profile.stop_counts[stop].saturating_add(read.multiplicity);
        }

        profile
    }

    pub fn len(&self) -> usize {
        self.start_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.start_counts.is_empty()
    }

    pub fn total_starts(&self) -> u64 {
        self.start_counts.iter().map(|&c| c as u64).sum()
    }

    pub fn total_stops(&self) -> u64 {
        self.stop_counts.iter().map(|&c| c as u64).sum()
    }

    /// True when no read boundary fell into the region
    pub fn has_no_evidence(&self) -> bool {
        self.total_starts() == 0
    }
}
