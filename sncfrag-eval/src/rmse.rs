use serde::Serialize;

use crate::matching::MatchResult;
use crate::stats::find_errors;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootMeanSquareError {
    pub error_5p: f64,
    pub error_3p: f64,
    /// Number of annotations the errors were computed over
    pub n: usize,
}

///
/// Collects unbucketed boundary errors over a corpus and reduces them to one RMS value per end.
///
/// An annotation without a prediction is penalised on both ends with a fixed `miss_penalty`,
/// the distance between the boundaries of its region.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RmsAccumulator {
    errors_5p: Vec<i64>,
    errors_3p: Vec<i64>,
}

impl RmsAccumulator {
    pub fn new() -> RmsAccumulator {
        RmsAccumulator::default()
    }

    pub fn add(&mut self, error_5p: i64, error_3p: i64) {
        self.errors_5p.push(error_5p);
        self.errors_3p.push(error_3p);
    }

    pub fn add_match(&mut self, result: &MatchResult, miss_penalty: u32, offset: i64) {
        match &result.prediction {
            Some(prediction) => {
                let errors = find_errors(&result.annotation, prediction, offset);
                self.add(errors.error_5p, errors.error_3p);
            }
            None => self.add(miss_penalty as i64, miss_penalty as i64),
        }
    }

    pub fn add_region(&mut self, matches: &[MatchResult], miss_penalty: u32, offset: i64) {
        for result in matches {
            self.add_match(result, miss_penalty, offset);
        }
    }

    pub fn len(&self) -> usize {
        self.errors_5p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors_5p.is_empty()
    }

    pub fn merge(&mut self, other: &RmsAccumulator) {
        self.errors_5p.extend_from_slice(&other.errors_5p);
        self.errors_3p.extend_from_slice(&other.errors_3p);
    }

    /// `None` when nothing was collected
    pub fn finish(&self) -> Option<RootMeanSquareError> {
        if self.is_empty() {
            return None;
        }
        Some(RootMeanSquareError {
            error_5p: rms(&self.errors_5p),
            error_3p: rms(&self.errors_3p),
            n: self.len(),
        })
    }
}

fn rms(values: &[i64]) -> f64 {
    let sum_sq: f64 = values.iter().map(|&v| (v as f64) * (v as f64)).sum();
    (sum_sq / values.len() as f64).sqrt()
}
