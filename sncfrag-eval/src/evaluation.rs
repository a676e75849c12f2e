use log::debug;

use sncfrag_core::models::{AnnotatedFragment, AnnotationIndex, NameLinks, PredictedFragment, Region};

use crate::intensity::IntensityRecord;
use crate::matching::{AnnotationMatcher, MatchResult};
use crate::rmse::RmsAccumulator;
use crate::stats::ErrorAggregator;

///
/// Everything an evaluation run produces: the outcome table, the RMS accumulator and the
/// per-annotation intensity records.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub aggregator: ErrorAggregator,
    pub rms: RmsAccumulator,
    pub intensities: Vec<IntensityRecord>,
}

impl Evaluation {
    pub fn merge(&mut self, other: Evaluation) {
        self.aggregator.merge(&other.aggregator);
        self.rms.merge(&other.rms);
        self.intensities.extend(other.intensities);
    }
}

///
/// Compares predicted fragments to the reference annotations of their region.
///
/// The annotations of a region are found by resolving its identifier through `links`.
///
pub struct Evaluator<'a> {
    annotations: &'a AnnotationIndex,
    links: &'a NameLinks,
    matcher: AnnotationMatcher,
}

impl<'a> Evaluator<'a> {
    pub fn new(annotations: &'a AnnotationIndex, links: &'a NameLinks, reference_offset: i64) -> Evaluator<'a> {
        Evaluator {
            annotations,
            links,
            matcher: AnnotationMatcher::new(reference_offset),
        }
    }

    /// Annotation key of `region` and its annotations (empty when not annotated)
    pub fn annotations_for(&self, region: &Region) -> (Option<&'a str>, &'a [AnnotatedFragment]) {
        let annotations: &'a AnnotationIndex = self.annotations;

        let entry = self
            .links
            .resolve(region.identifier())
            .and_then(|key| annotations.index.get_key_value(key));

        match entry {
            Some((key, fragments)) => (Some(key.as_str()), fragments.as_slice()),
            None => (None, Default::default()),
        }
    }

    pub fn match_region(&self, region: &Region, predictions: &[PredictedFragment]) -> Vec<MatchResult> {
        let (_, annotations) = self.annotations_for(region);
        self.matcher.match_region(annotations, predictions)
    }

    ///
    /// Evaluate the predictions of one region.
    ///
    /// A region without linked annotations yields an empty evaluation and is not counted as
    /// processed. A missed annotation costs `stop - start` of the region in the RMS report.
    ///
    pub fn evaluate_region(&self, region: &Region, predictions: &[PredictedFragment]) -> Evaluation {
        let offset = self.matcher.reference_offset;
        let mut evaluation = Evaluation {
            aggregator: ErrorAggregator::new(offset),
            ..Default::default()
        };

        let (Some(key), annotations) = self.annotations_for(region) else {
            debug!("{}: no annotations linked to {}", region, region.identifier());
            return evaluation;
        };

        let matches = self.matcher.match_region(annotations, predictions);
        evaluation.aggregator.add_region(&matches);
        evaluation.rms.add_region(&matches, region.stop - region.start, offset);

        evaluation.intensities = matches
            .iter()
            .filter_map(|m| IntensityRecord::from_match(key, m, offset))
            .collect();

        evaluation
    }

    /// Evaluate a corpus of regions, merging the per-region results in order
    pub fn evaluate<'b, I>(&self, regions: I) -> Evaluation
    where
        I: IntoIterator<Item = (&'b Region, &'b [PredictedFragment])>,
    {
        let mut total = Evaluation {
            aggregator: ErrorAggregator::new(self.matcher.reference_offset),
            ..Default::default()
        };
        for (region, predictions) in regions {
            total.merge(self.evaluate_region(region, predictions));
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use sncfrag_core::models::Evidence;
    use std::collections::HashMap;

    #[fixture]
    fn index() -> AnnotationIndex {
        let mut index = AnnotationIndex::default();
        index.insert("MIR-A", AnnotatedFragment::new(5, 15, Evidence::Experimental));
        index.insert(
            "MIR-A",
            AnnotatedFragment::new(30, 45, Evidence::NotExperimental).with_supporting_reads(2),
        );
        index
    }

    fn prediction(start: u32, stop: u32) -> PredictedFragment {
        PredictedFragment {
            start,
            stop,
            supporting_reads_start: 5,
            supporting_reads_stop: 5,
            supporting_reads: 5,
        }
    }

    #[rstest]
    fn test_exact_match(index: AnnotationIndex) {
        let links = NameLinks::Identity;
        let evaluator = Evaluator::new(&index, &links, 0);
        let region = Region::new("MIR-A", 0, 59);

        let evaluation = evaluator.evaluate_region(&region, &[prediction(5, 15)]);
        let stats = &evaluation.aggregator.table;

        assert_eq!(stats.experimental.predicted, 1);
        assert_eq!(stats.experimental.error_5p.get(0), 1);
        assert_eq!(stats.experimental.error_3p.get(0), 1);
        assert_eq!(stats.not_experimental.not_predicted_with_reads, 1);
        assert_eq!(evaluation.intensities.len(), 1);
        assert_eq!(evaluation.intensities[0].key, "MIR-A");
        assert_eq!(evaluation.rms.len(), 2);
    }

    #[rstest]
    fn test_links_redirect_lookup(index: AnnotationIndex) {
        let links = NameLinks::Table(HashMap::from([("chr-a".to_string(), "MIR-A".to_string())]));
        let evaluator = Evaluator::new(&index, &links, 0);

        let linked = Region::new("chr-a", 0, 59);
        let unlinked = Region::new("MIR-A", 0, 59);

        assert_eq!(evaluator.annotations_for(&linked).1.len(), 2);
        assert!(evaluator.annotations_for(&unlinked).1.is_empty());
    }

    #[rstest]
    fn test_unlinked_regions_are_not_counted(index: AnnotationIndex) {
        let links = NameLinks::Table(HashMap::from([("chr-a".to_string(), "MIR-A".to_string())]));
        let evaluator = Evaluator::new(&index, &links, 0);

        let linked = Region::new("chr-a", 0, 59);
        let unlinked = Region::new("chr-b", 0, 59);
        let none: Vec<PredictedFragment> = Vec::new();

        let evaluation = evaluator.evaluate(vec![
            (&linked, none.as_slice()),
            (&unlinked, none.as_slice()),
        ]);

        assert_eq!(evaluation.aggregator.regions_processed, 1);
        assert_eq!(evaluation.aggregator.annotations_processed, 2);
        assert_eq!(evaluation.rms.len(), 2);
        assert!(evaluation.intensities.is_empty());
    }

    #[rstest]
    fn test_no_predictions_is_all_unmatched(index: AnnotationIndex) {
        let links = NameLinks::Identity;
        let evaluator = Evaluator::new(&index, &links, 0);
        let region = Region::new("MIR-A", 0, 59);

        let predictions: Vec<PredictedFragment> = Vec::new();
        let evaluation = evaluator.evaluate(vec![(&region, predictions.as_slice())]);
        let stats = &evaluation.aggregator.table;

        assert_eq!(stats.experimental.predicted + stats.not_experimental.predicted, 0);
        assert_eq!(stats.experimental.not_predicted_no_reads, 1);
        assert_eq!(stats.not_experimental.not_predicted_with_reads, 1);
        assert_eq!(evaluation.aggregator.regions_processed, 1);
        assert_eq!(evaluation.aggregator.annotations_processed, 2);
        // misses cost the distance between the region boundaries, 59 - 0
        assert_eq!(evaluation.rms.finish().unwrap().error_5p, 59.0);
    }
}
