use std::cmp::Reverse;
use std::collections::BTreeMap;

use log::debug;

use sncfrag_core::models::{PredictedFragment, ReadInterval, Region};

use crate::config::DetectorConfig;
use crate::peaks::Peak;

/// A start peak paired with a stop peak, in region relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub stop: usize,
    pub start_support: u32,
    pub stop_support: u32,
    pub score: u64,
}

impl Candidate {
    pub fn length(&self) -> usize {
        self.stop - self.start + 1
    }

    /// Number of positions both candidates cover
    pub fn shared_bases(&self, other: &Candidate) -> usize {
        let lo = self.start.max(other.start);
        let hi = self.stop.min(other.stop);
        if hi >= lo { hi - lo + 1 } else { 0 }
    }
}

///
/// Turns start and stop peaks into the final, non-redundant set of fragments of a region.
///
#[derive(Debug, Clone)]
pub struct FragmentReconstructor {
    config: DetectorConfig,
}

impl FragmentReconstructor {
    pub fn new(config: DetectorConfig) -> FragmentReconstructor {
        FragmentReconstructor { config }
    }

    ///
    /// Pair every start peak with every stop peak at or after it, keeping the pairs whose
    /// length lies within the configured window.
    ///
    /// Both peak lists must be ordered by position, as [crate::peaks::PeakDetector] returns them.
    pub fn candidates(&self, start_peaks: &[Peak], stop_peaks: &[Peak]) -> Vec<Candidate> {
        let min_length = self.config.min_fragment_length as usize;
        let max_length = self.config.max_fragment_length as usize;

        let mut candidates = Vec::new();
        for start in start_peaks {
            for stop in stop_peaks.iter().filter(|p| p.position >= start.position) {
                let length = stop.position - start.position + 1;
                if length > max_length {
                    break;
                }
                if length < min_length {
                    continue;
                }

                candidates.push(Candidate {
                    start: start.position,
                    stop: stop.position,
                    start_support: start.support,
                    stop_support: stop.support,
                    score: self
                        .config
                        .score_function
                        .score(start.support, stop.support),
                });
            }
        }

        candidates
    }

    ///
    /// Keep the best scoring candidates, dropping any candidate that shares more than
    /// `max_overlap_fraction` of the shorter span with one already kept.
    ///
    /// Candidates are visited by descending score, then ascending start, then ascending
    /// stop, so equal scores resolve to the leftmost candidate. The survivors are returned
    /// sorted by (start, stop).
    pub fn resolve_overlaps(&self, mut candidates: Vec<Candidate>) -> Vec<Candidate> {
        candidates.sort_by_key(|c| (Reverse(c.score), c.start, c.stop));

        let mut kept: Vec<Candidate> = Vec::new();
        for candidate in candidates {
            let conflicts = kept.iter().any(|k| {
                let shorter = candidate.length().min(k.length()) as f64;
                candidate.shared_bases(k) as f64 / shorter > self.config.max_overlap_fraction
            });
            if !conflicts {
                kept.push(candidate);
            }
        }

        let unique: BTreeMap<(usize, usize), Candidate> =
            kept.into_iter().map(|c| ((c.start, c.stop), c)).collect();
        unique.into_values().collect()
    }

    ///
    /// Build the predicted fragments of `region`.
    ///
    /// `reads` are used to count the coverage of each surviving fragment, i.e. the summed
    /// multiplicity of reads overlapping it.
    pub fn reconstruct(
        &self,
        region: &Region,
        start_peaks: &[Peak],
        stop_peaks: &[Peak],
        reads: &[ReadInterval],
    ) -> Vec<PredictedFragment> {
        if start_peaks.is_empty() || stop_peaks.is_empty() {
            return Vec::new();
        }

        let candidates = self.candidates(start_peaks, stop_peaks);
        let n_candidates = candidates.len();
        let selected = self.resolve_overlaps(candidates);
        debug!(
            "{}: {} start peaks, {} stop peaks, {} candidates, {} fragments",
            region,
            start_peaks.len(),
            stop_peaks.len(),
            n_candidates,
            selected.len()
        );

        selected
            .into_iter()
            .map(|c| {
                let start = region.start + c.start as u32;
                let stop = region.start + c.stop as u32;
                let supporting_reads = reads
                    .iter()
                    .filter(|r| r.overlaps(start, stop))
                    .fold(0u32, |acc, r| acc.saturating_add(r.multiplicity));

                PredictedFragment {
                    start,
                    stop,
                    supporting_reads_start: c.start_support,
                    supporting_reads_stop: c.stop_support,
                    supporting_reads,
                }
            })
            .collect()
    }
}
