use serde::Serialize;

use sncfrag_core::models::{AnnotatedFragment, PredictedFragment};

///
/// Anything with closed `[start, stop]` coordinates.
///
pub trait Interval {
    fn start(&self) -> i64;
    fn stop(&self) -> i64;
}

impl Interval for AnnotatedFragment {
    fn start(&self) -> i64 {
        self.start as i64
    }

    fn stop(&self) -> i64 {
        self.stop as i64
    }
}

impl Interval for PredictedFragment {
    fn start(&self) -> i64 {
        self.start as i64
    }

    fn stop(&self) -> i64 {
        self.stop as i64
    }
}

impl Interval for (i64, i64) {
    fn start(&self) -> i64 {
        self.0
    }

    fn stop(&self) -> i64 {
        self.1
    }
}

///
/// Signed overlap of two closed intervals, `min(a.stop, b.stop) - max(a.start, b.start)`.
///
/// Positive when the intervals share more than one position, zero when they touch in
/// exactly one, negative when they are disjoint.
///
#[inline]
pub fn overlap<A: Interval + ?Sized, B: Interval + ?Sized>(a: &A, b: &B) -> i64 {
    a.stop().min(b.stop()) - a.start().max(b.start())
}

///
/// Find the prediction that overlaps `annotation` the most.
///
/// Predictions are shifted by `-reference_offset` before comparing. Only overlaps > 0 count,
/// and on equal overlap the first prediction in `predictions` wins.
///
pub fn find_closest_overlapping_fragment<'a>(
    annotation: &AnnotatedFragment,
    predictions: &'a [PredictedFragment],
    reference_offset: i64,
) -> Option<(&'a PredictedFragment, i64)> {
    let mut best: Option<(&PredictedFragment, i64)> = None;

    for prediction in predictions {
        let shifted = (
            prediction.start as i64 - reference_offset,
            prediction.stop as i64 - reference_offset,
        );
        let ov = overlap(annotation, &shifted);
        if ov <= 0 {
            continue;
        }
        match best {
            Some((_, best_ov)) if best_ov >= ov => {}
            _ => best = Some((prediction, ov)),
        }
    }

    best
}

/// One annotation together with the prediction chosen for it, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub annotation: AnnotatedFragment,
    pub prediction: Option<PredictedFragment>,
    /// Overlap that selected `prediction`, 0 when unmatched
    pub overlap: i64,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        self.prediction.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationMatcher {
    /// Shift between the prediction and the annotation coordinate systems
    pub reference_offset: i64,
}

impl AnnotationMatcher {
    pub fn new(reference_offset: i64) -> AnnotationMatcher {
        AnnotationMatcher { reference_offset }
    }

    pub fn match_annotation(
        &self,
        annotation: &AnnotatedFragment,
        predictions: &[PredictedFragment],
    ) -> MatchResult {
        match find_closest_overlapping_fragment(annotation, predictions, self.reference_offset) {
            Some((prediction, overlap)) => MatchResult {
                annotation: annotation.clone(),
                prediction: Some(prediction.clone()),
                overlap,
            },
            None => MatchResult {
                annotation: annotation.clone(),
                prediction: None,
                overlap: 0,
            },
        }
    }

    /// Match every annotation of a region, in annotation order
    pub fn match_region(
        &self,
        annotations: &[AnnotatedFragment],
        predictions: &[PredictedFragment],
    ) -> Vec<MatchResult> {
        annotations
            .iter()
            .map(|a| self.match_annotation(a, predictions))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use sncfrag_core::models::Evidence;

    fn prediction(start: u32, stop: u32) -> PredictedFragment {
        PredictedFragment {
            start,
            stop,
            supporting_reads_start: 1,
            supporting_reads_stop: 1,
            supporting_reads: 1,
        }
    }

    #[rstest]
    #[case((0, 10), (5, 20), 5)]
    #[case((0, 10), (10, 20), 0)]
    #[case((0, 10), (12, 20), -2)]
    #[case((3, 7), (0, 100), 4)]
    #[case((4, 12), (0, 14), 8)]
    fn test_overlap(#[case] a: (i64, i64), #[case] b: (i64, i64), #[case] expected: i64) {
        assert_eq!(overlap(&a, &b), expected);
        assert_eq!(overlap(&b, &a), expected);
    }

    #[rstest]
    fn test_overlap_is_symmetric() {
        for a0 in 0..12i64 {
            for b0 in 0..12i64 {
                let a = (a0, a0 + (a0 * 5) % 7);
                let b = (b0, b0 + (b0 * 3) % 9);
                assert_eq!(overlap(&a, &b), overlap(&b, &a));
            }
        }
    }

    #[rstest]
    fn test_closest_picks_largest_overlap() {
        let annotation = AnnotatedFragment::new(10, 30, Evidence::Experimental);
        let predictions = vec![prediction(0, 12), prediction(12, 28), prediction(25, 60)];

        let (best, ov) = find_closest_overlapping_fragment(&annotation, &predictions, 0).unwrap();
        assert_eq!(best, &predictions[1]);
        assert_eq!(ov, 16);
    }

    #[rstest]
    fn test_ties_keep_first() {
        let annotation = AnnotatedFragment::new(10, 20, Evidence::Experimental);
        let predictions = vec![prediction(5, 15), prediction(15, 25)];

        let (best, _) = find_closest_overlapping_fragment(&annotation, &predictions, 0).unwrap();
        assert_eq!(best, &predictions[0]);
    }

    #[rstest]
    fn test_touching_is_no_match() {
        let annotation = AnnotatedFragment::new(10, 20, Evidence::Experimental);
        let predictions = vec![prediction(20, 30), prediction(0, 10)];
        assert!(find_closest_overlapping_fragment(&annotation, &predictions, 0).is_none());
    }

    #[rstest]
    fn test_offset_shifts_predictions() {
        let annotation = AnnotatedFragment::new(10, 20, Evidence::Experimental);
        let predictions = vec![prediction(110, 120)];

        assert!(find_closest_overlapping_fragment(&annotation, &predictions, 0).is_none());
        let (_, ov) = find_closest_overlapping_fragment(&annotation, &predictions, 100).unwrap();
        assert_eq!(ov, 10);
    }

    #[rstest]
    fn test_match_region() {
        let matcher = AnnotationMatcher::default();
        let annotations = vec![
            AnnotatedFragment::new(2, 12, Evidence::Experimental),
            AnnotatedFragment::new(70, 90, Evidence::NotExperimental),
        ];
        let predictions = vec![prediction(3, 12)];

        let matches = matcher.match_region(&annotations, &predictions);
        assert_eq!(matches.len(), 2);
        assert!(matches[0].is_matched());
        assert_eq!(matches[0].overlap, 9);
        assert!(!matches[1].is_matched());
        assert_eq!(matches[1].overlap, 0);
    }
}
