use serde::Serialize;

use sncfrag_core::models::Evidence;

use crate::matching::MatchResult;
use crate::stats::find_errors;

///
/// Boundary errors of one matched annotation next to the read support of its prediction,
/// to check whether weakly supported fragments are called less precisely.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntensityRecord {
    pub key: String,
    pub annotation: Option<String>,
    pub evidence: Evidence,
    pub error_5p: i64,
    pub supporting_reads_start: u32,
    pub error_3p: i64,
    pub supporting_reads_stop: u32,
    pub coverage: u32,
}

impl IntensityRecord {
    /// `None` for unmatched annotations
    pub fn from_match(key: &str, result: &MatchResult, offset: i64) -> Option<IntensityRecord> {
        let prediction = result.prediction.as_ref()?;
        let errors = find_errors(&result.annotation, prediction, offset);

        Some(IntensityRecord {
            key: key.to_owned(),
            annotation: result.annotation.name.clone(),
            evidence: result.annotation.evidence,
            error_5p: errors.error_5p,
            supporting_reads_start: prediction.supporting_reads_start,
            error_3p: errors.error_3p,
            supporting_reads_stop: prediction.supporting_reads_stop,
            coverage: prediction.supporting_reads,
        })
    }
}
