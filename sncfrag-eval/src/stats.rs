use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use sncfrag_core::models::{AnnotatedFragment, Evidence, PredictedFragment};

use crate::matching::MatchResult;

/// Signed distances between the boundaries of a prediction and its annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub error_5p: i64,
    pub error_3p: i64,
}

///
/// Compute the boundary errors of a matched pair.
///
/// Negative values mean the prediction lies upstream of the annotation boundary, positive
/// values downstream. `offset` is subtracted from both.
///
pub fn find_errors(
    annotation: &AnnotatedFragment,
    prediction: &PredictedFragment,
    offset: i64,
) -> ErrorRecord {
    ErrorRecord {
        error_5p: prediction.start as i64 - annotation.start as i64 - offset,
        error_3p: prediction.stop as i64 - annotation.stop as i64 - offset,
    }
}

pub const HISTOGRAM_BINS: usize = 13;
pub const HISTOGRAM_LABELS: [&str; HISTOGRAM_BINS] = [
    "<-5", "-5", "-4", "-3", "-2", "-1", "0", "1", "2", "3", "4", "5", ">5",
];

///
/// Counts of boundary errors in 13 fixed bins: `<-5`, one bin per value in `-5..=5`, `>5`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorHistogram {
    counts: [u64; HISTOGRAM_BINS],
}

impl ErrorHistogram {
    pub fn bin_index(error: i64) -> usize {
        if error < -5 {
            0
        } else if error > 5 {
            HISTOGRAM_BINS - 1
        } else {
            (error + 6) as usize
        }
    }

    pub fn add(&mut self, error: i64) {
        self.counts[Self::bin_index(error)] += 1;
    }

    /// Count of the bin `error` falls into
    pub fn get(&self, error: i64) -> u64 {
        self.counts[Self::bin_index(error)]
    }

    pub fn counts(&self) -> &[u64; HISTOGRAM_BINS] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn merge(&mut self, other: &ErrorHistogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }
}

impl Serialize for ErrorHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(HISTOGRAM_BINS))?;
        for (label, count) in HISTOGRAM_LABELS.iter().zip(self.counts.iter()) {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Outcomes of all annotations of one evidence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EvidenceStats {
    pub predicted: u64,
    pub error_5p: ErrorHistogram,
    pub error_3p: ErrorHistogram,
    pub not_predicted_with_reads: u64,
    pub not_predicted_no_reads: u64,
}

impl EvidenceStats {
    pub fn total(&self) -> u64 {
        self.predicted + self.not_predicted_with_reads + self.not_predicted_no_reads
    }

    pub fn merge(&mut self, other: &EvidenceStats) {
        self.predicted += other.predicted;
        self.error_5p.merge(&other.error_5p);
        self.error_3p.merge(&other.error_3p);
        self.not_predicted_with_reads += other.not_predicted_with_reads;
        self.not_predicted_no_reads += other.not_predicted_no_reads;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsTable {
    pub experimental: EvidenceStats,
    pub not_experimental: EvidenceStats,
}

impl StatsTable {
    pub fn bucket(&self, evidence: Evidence) -> &EvidenceStats {
        match evidence {
            Evidence::Experimental => &self.experimental,
            Evidence::NotExperimental => &self.not_experimental,
        }
    }

    pub fn bucket_mut(&mut self, evidence: Evidence) -> &mut EvidenceStats {
        match evidence {
            Evidence::Experimental => &mut self.experimental,
            Evidence::NotExperimental => &mut self.not_experimental,
        }
    }

    ///
    /// Tally one annotation outcome into its evidence bucket.
    ///
    /// Returns the boundary errors when the annotation was matched.
    pub fn add_match(&mut self, result: &MatchResult, offset: i64) -> Option<ErrorRecord> {
        let bucket = self.bucket_mut(result.annotation.evidence);
        match &result.prediction {
            Some(prediction) => {
                let errors = find_errors(&result.annotation, prediction, offset);
                bucket.predicted += 1;
                bucket.error_5p.add(errors.error_5p);
                bucket.error_3p.add(errors.error_3p);
                Some(errors)
            }
            None => {
                if result.annotation.supporting_reads > 0 {
                    bucket.not_predicted_with_reads += 1;
                } else {
                    bucket.not_predicted_no_reads += 1;
                }
                None
            }
        }
    }

    pub fn merge(&mut self, other: &StatsTable) {
        self.experimental.merge(&other.experimental);
        self.not_experimental.merge(&other.not_experimental);
    }
}

///
/// Accumulates a [StatsTable] over a corpus of regions.
///
/// One aggregator per worker, combined afterwards with [ErrorAggregator::merge].
///
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorAggregator {
    pub table: StatsTable,
    pub regions_processed: u64,
    pub annotations_processed: u64,
    #[serde(skip)]
    pub reference_offset: i64,
}

impl ErrorAggregator {
    pub fn new(reference_offset: i64) -> ErrorAggregator {
        ErrorAggregator {
            reference_offset,
            ..Default::default()
        }
    }

    /// Add the match results of one region, returning the errors of the matched annotations
    pub fn add_region(&mut self, matches: &[MatchResult]) -> Vec<ErrorRecord> {
        self.regions_processed += 1;
        self.annotations_processed += matches.len() as u64;

        matches
            .iter()
            .filter_map(|m| self.table.add_match(m, self.reference_offset))
            .collect()
    }

    pub fn merge(&mut self, other: &ErrorAggregator) {
        self.table.merge(&other.table);
        self.regions_processed += other.regions_processed;
        self.annotations_processed += other.annotations_processed;
    }
}
