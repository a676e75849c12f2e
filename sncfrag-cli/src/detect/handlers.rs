use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::{info, warn};

use sncfrag_detect::{DetectorConfig, FragmentFinder, RegionFragments, ScoreFunction};
use sncfrag_io::{
    FragmentFormat, ReferenceSequences, open_output, write_fragments_bed, write_fragments_table,
};

use crate::common::{build_read_source, load_regions};
use crate::detect::cli::DEFAULT_FORMAT;

///
/// Load the detector configuration: defaults, then the TOML file given with `--config`,
/// then the individual flags.
///
pub fn detector_config(matches: &ArgMatches) -> Result<DetectorConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => DetectorConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load detector configuration from {}", path))?,
        None => DetectorConfig::default(),
    };

    if let Some(v) = matches.get_one::<u32>("min-support") {
        config.min_peak_support = *v;
    }
    if let Some(v) = matches.get_one::<u32>("min-length") {
        config.min_fragment_length = *v;
    }
    if let Some(v) = matches.get_one::<u32>("max-length") {
        config.max_fragment_length = *v;
    }
    if let Some(v) = matches.get_one::<f64>("max-overlap") {
        config.max_overlap_fraction = *v;
    }
    if let Some(v) = matches.get_one::<String>("score") {
        config.score_function = ScoreFunction::from_str(v)?;
    }

    config.validate()?;
    Ok(config)
}

///
/// Run the detection over every region of the region file, returning the results in
/// region order.
///
pub fn detect_fragments(matches: &ArgMatches) -> Result<Vec<RegionFragments>> {
    let config = detector_config(matches)?;
    let threads = matches.get_one::<usize>("threads").copied().unwrap_or(1);
    let regions = load_regions(matches)?;
    let source = build_read_source(matches)?;

    let finder = FragmentFinder::new(config)?;
    let progress = log::log_enabled!(log::Level::Info) && !log::log_enabled!(log::Level::Debug);
    let results = finder.process_regions(&regions, source.as_ref(), threads, progress)?;

    let n_fragments: usize = results.iter().map(|r| r.fragments.len()).sum();
    info!("Detected {} fragments in {} regions", n_fragments, results.len());

    Ok(results)
}

pub fn run_detect(matches: &ArgMatches) -> Result<()> {
    let default_format = DEFAULT_FORMAT.to_string();
    let format = matches.get_one::<String>("format").unwrap_or(&default_format);
    let format = FragmentFormat::from_str(format)?;

    let reference = match matches.get_one::<String>("fasta") {
        Some(path) => Some(
            ReferenceSequences::try_from(Path::new(path))
                .with_context(|| format!("Failed to load reference sequences from {}", path))?,
        ),
        None => None,
    };
    if reference.is_some() && format == FragmentFormat::Bed {
        warn!("--fasta only applies to the table format, sequences are not written");
    }

    let results = detect_fragments(matches)?;

    if let Some(reference) = &reference {
        for region in reference.missing(results.iter().map(|r| &r.region)) {
            warn!("{}: no sequence in the reference, fragments get '.'", region.chr);
        }
    }

    let output = matches.get_one::<String>("output").map(Path::new);
    let mut out = open_output(output)?;
    let rows = results.iter().map(|r| (&r.region, r.fragments.as_slice()));
    match format {
        FragmentFormat::Bed => write_fragments_bed(&mut out, rows)?,
        FragmentFormat::Table => write_fragments_table(&mut out, rows, reference.as_ref())?,
    }
    out.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::detect::cli::create_detect_cli;

    fn parse(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["detect"];
        argv.extend_from_slice(args);
        create_detect_cli().try_get_matches_from(argv).unwrap()
    }

    #[rstest]
    fn test_flags_override_config_file() {
        let matches = parse(&[
            "-r",
            "../tests/data/regions.gff",
            "--reads",
            "../tests/data/reads.bed",
            "-c",
            "../tests/data/detector.toml",
            "--max-length",
            "90",
        ]);
        let config = detector_config(&matches).unwrap();

        assert_eq!(config.min_fragment_length, 8);
        assert_eq!(config.max_fragment_length, 90);
        assert_eq!(config.score_function, ScoreFunction::Min);
    }

    #[rstest]
    fn test_invalid_override_is_rejected() {
        let matches = parse(&[
            "-r",
            "../tests/data/regions.gff",
            "--reads",
            "../tests/data/reads.bed",
            "--min-length",
            "300",
        ]);
        assert!(detector_config(&matches).is_err());
    }

    #[rstest]
    fn test_run_detect_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("fragments.tsv");
        let matches = parse(&[
            "-r",
            "../tests/data/regions.gff",
            "--reads",
            "../tests/data/reads.bed",
            "-f",
            "table",
            "-t",
            "2",
            "-o",
            output.to_str().unwrap(),
        ]);

        run_detect(&matches).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(sncfrag_io::FRAGMENT_TABLE_HEADER));
        assert!(lines.next().is_some_and(|l| l.starts_with("MIR-TEST\t")));
    }

    #[rstest]
    fn test_run_detect_adds_sequences_from_fasta() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("fragments.tsv");
        let matches = parse(&[
            "-r",
            "../tests/data/regions.gff",
            "--reads",
            "../tests/data/reads.bed",
            "-f",
            "table",
            "--fasta",
            "../tests/data/reference.fa",
            "-o",
            output.to_str().unwrap(),
        ]);

        run_detect(&matches).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            format!("{}\tsequence", sncfrag_io::FRAGMENT_TABLE_HEADER)
        );
        assert!(lines[1].starts_with("MIR-TEST\t"));
        assert!(lines[1].contains("\t5\t15\t11\t"));
        assert!(lines[1].ends_with("\tCTAAAGACAAT"));
    }

    #[rstest]
    fn test_missing_fasta_is_an_error() {
        let matches = parse(&[
            "-r",
            "../tests/data/regions.gff",
            "--reads",
            "../tests/data/reads.bed",
            "--fasta",
            "../tests/data/missing.fa",
        ]);
        assert!(run_detect(&matches).is_err());
    }
}
