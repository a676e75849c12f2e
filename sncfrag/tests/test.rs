use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rstest::*;

use sncfrag::core::models::{
    AnnotatedFragment, AnnotationIndex, Evidence, NameLinks, PredictedFragment, ReadInterval, Region,
    RegionList,
};
use sncfrag::detect::{DetectorConfig, FragmentFinder, ScoreFunction};
use sncfrag::eval::Evaluator;
use sncfrag::io::{BedReadSource, MemoryReadSource, write_fragments_bed};

fn get_test_path(file_name: &str) -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join("../tests/data")
        .join(file_name)
}

#[fixture]
fn finder() -> FragmentFinder {
    FragmentFinder::new(DetectorConfig::default()).unwrap()
}

fn fragment(start: u32, stop: u32) -> (u32, u32) {
    (start, stop)
}

fn spans(fragments: &[PredictedFragment]) -> Vec<(u32, u32)> {
    fragments.iter().map(|f| fragment(f.start, f.stop)).collect()
}

#[rstest]
fn test_single_fragment_matches_its_annotation(finder: FragmentFinder) {
    let region = Region::new("MIR-X", 0, 19);
    let reads = vec![ReadInterval::new(5, 15); 5];

    let fragments = finder.find_fragments(&region, &reads);
    assert_eq!(
        fragments,
        vec![PredictedFragment {
            start: 5,
            stop: 15,
            supporting_reads_start: 5,
            supporting_reads_stop: 5,
            supporting_reads: 5,
        }]
    );

    let mut annotations = AnnotationIndex::default();
    annotations.insert(
        "MIR-X",
        AnnotatedFragment::new(5, 15, Evidence::Experimental).with_supporting_reads(5),
    );
    let links = NameLinks::Identity;
    let evaluator = Evaluator::new(&annotations, &links, 0);

    let evaluation = evaluator.evaluate_region(&region, &fragments);
    let experimental = &evaluation.aggregator.table.experimental;
    assert_eq!(experimental.predicted, 1);
    assert_eq!(experimental.error_5p.get(0), 1);
    assert_eq!(experimental.error_3p.get(0), 1);
    assert_eq!(evaluation.aggregator.table.not_experimental.total(), 0);

    let rms = evaluation.rms.finish().unwrap();
    assert_eq!(rms.error_5p, 0.0);
    assert_eq!(rms.error_3p, 0.0);

    assert_eq!(evaluation.intensities.len(), 1);
    assert_eq!(evaluation.intensities[0].coverage, 5);
}

#[rstest]
fn test_two_fragments_in_one_precursor(finder: FragmentFinder) {
    let region = Region::new("MIR-Y", 0, 59);
    let source = MemoryReadSource::new()
        .with_reads("MIR-Y", vec![ReadInterval::new(2, 12); 3])
        .with_reads("MIR-Y", vec![ReadInterval::new(30, 45); 2]);

    let result = finder.process_region(&region, &source).unwrap();
    assert_eq!(result.read_count(), 5);
    assert_eq!(spans(&result.fragments), vec![(2, 12), (30, 45)]);
    assert_eq!(result.fragments[0].supporting_reads, 3);
    assert_eq!(result.fragments[1].supporting_reads, 2);
}

#[rstest]
fn test_region_without_reads_counts_every_annotation_as_missed(finder: FragmentFinder) {
    let region = Region::new("MIR-Z", 0, 49);
    let fragments = finder.find_fragments(&region, &[]);
    assert!(fragments.is_empty());

    let mut annotations = AnnotationIndex::default();
    annotations.insert(
        "MIR-Z",
        AnnotatedFragment::new(3, 24, Evidence::Experimental).with_supporting_reads(7),
    );
    annotations.insert("MIR-Z", AnnotatedFragment::new(28, 45, Evidence::NotExperimental));
    let links = NameLinks::Identity;

    let evaluation = Evaluator::new(&annotations, &links, 0).evaluate_region(&region, &fragments);
    let table = &evaluation.aggregator.table;
    assert_eq!(table.experimental.predicted, 0);
    assert_eq!(table.experimental.not_predicted_with_reads, 1);
    assert_eq!(table.not_experimental.not_predicted_no_reads, 1);
    assert_eq!(table.experimental.error_5p.total(), 0);

    // missed annotations cost the distance between the region boundaries
    let rms = evaluation.rms.finish().unwrap();
    assert_eq!(rms.n, 2);
    assert_eq!(rms.error_5p, 49.0);
    assert!(evaluation.intensities.is_empty());
}

#[rstest]
fn test_pipeline_from_files(finder: FragmentFinder) {
    let regions = RegionList::try_from(get_test_path("regions.gff").as_path()).unwrap();
    let source = BedReadSource::try_from(get_test_path("reads.bed").as_path()).unwrap();
    let annotations = AnnotationIndex::try_from(get_test_path("annotations.tsv").as_path()).unwrap();
    let links = NameLinks::try_from(get_test_path("links.tsv").as_path()).unwrap();

    let results = finder.process_regions(&regions, &source, 2, false).unwrap();
    let chrs: Vec<&str> = results.iter().map(|r| r.region.chr.as_str()).collect();
    assert_eq!(chrs, vec!["MIR-TEST", "SNORD-TEST", "EMPTY-TEST"]);

    assert_eq!(spans(&results[0].fragments), vec![(5, 15), (30, 45)]);
    assert_eq!(spans(&results[1].fragments), vec![(10, 29), (50, 71)]);
    assert!(results[2].fragments.is_empty());

    // EMPTY-TEST is not in the link table, so it is neither evaluated nor counted
    let evaluation = Evaluator::new(&annotations, &links, 0).evaluate(
        results
            .iter()
            .map(|r| (&r.region, r.fragments.as_slice())),
    );
    let aggregator = &evaluation.aggregator;
    assert_eq!(aggregator.regions_processed, 2);
    assert_eq!(aggregator.annotations_processed, 3);
    assert_eq!(aggregator.table.experimental.predicted, 2);
    assert_eq!(aggregator.table.not_experimental.predicted, 1);
    assert_eq!(aggregator.table.experimental.error_5p.get(0), 2);

    let mut bed = Vec::new();
    write_fragments_bed(
        &mut bed,
        results
            .iter()
            .map(|r| (&r.region, r.fragments.as_slice())),
    )
    .unwrap();
    let bed = String::from_utf8(bed).unwrap();
    assert_eq!(
        bed.lines().next(),
        Some("MIR-TEST\t5\t16\thsa-mir-test_1\t5\t.")
    );
    assert_eq!(bed.lines().count(), 4);
}

#[rstest]
fn test_identity_links_evaluate_every_region() {
    let regions = RegionList::try_from(get_test_path("regions.gff").as_path()).unwrap();
    let annotations = AnnotationIndex::try_from(get_test_path("annotations.tsv").as_path()).unwrap();
    let links = NameLinks::Identity;

    let predictions: Vec<Vec<PredictedFragment>> = vec![Vec::new(); regions.len()];
    let evaluation = Evaluator::new(&annotations, &links, 0).evaluate(
        regions
            .iter()
            .zip(predictions.iter())
            .map(|(region, p)| (region, p.as_slice())),
    );

    let table = &evaluation.aggregator.table;
    assert_eq!(evaluation.aggregator.annotations_processed, 5);
    assert_eq!(table.experimental.not_predicted_with_reads, 2);
    assert_eq!(table.experimental.not_predicted_no_reads, 1);
    assert_eq!(table.not_experimental.not_predicted_with_reads, 1);
    assert_eq!(table.not_experimental.not_predicted_no_reads, 1);
}

#[rstest]
fn test_min_score_with_file_config() {
    let config = DetectorConfig::try_from(get_test_path("detector.toml").as_path()).unwrap();
    assert_eq!(config.score_function, ScoreFunction::Min);

    let finder = FragmentFinder::new(config).unwrap();
    let region = Region::new("MIR-TEST", 0, 59);
    let reads = vec![ReadInterval::new(5, 15); 4];

    // shorter than min_fragment_length = 8
    let short = vec![ReadInterval::new(40, 44); 6];
    let mut all = reads.clone();
    all.extend(short);

    assert_eq!(spans(&finder.find_fragments(&region, &all)), vec![(5, 15)]);
}
