use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use sncfrag_core::models::{AnnotationIndex, NameLinks};
use sncfrag_detect::RegionFragments;
use sncfrag_eval::{Evaluation, Evaluator};
use sncfrag_io::open_output;

use crate::detect::handlers::detect_fragments;
use crate::evaluate::cli::DEFAULT_MODE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    Table,
    Rmse,
    Intensity,
}

impl FromStr for EvaluationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(EvaluationMode::Table),
            "rmse" => Ok(EvaluationMode::Rmse),
            "intensity" => Ok(EvaluationMode::Intensity),
            other => Err(anyhow::anyhow!(
                "Invalid evaluation mode: {}. Valid options are 'table', 'rmse' or 'intensity'",
                other
            )),
        }
    }
}

pub fn evaluate_fragments(
    results: &[RegionFragments],
    annotations: &AnnotationIndex,
    links: &NameLinks,
    offset: i64,
) -> Evaluation {
    let evaluator = Evaluator::new(annotations, links, offset);
    evaluator.evaluate(
        results
            .iter()
            .map(|r| (&r.region, r.fragments.as_slice())),
    )
}

pub fn run_evaluate(matches: &ArgMatches) -> Result<()> {
    let default_mode = DEFAULT_MODE.to_string();
    let mode = EvaluationMode::from_str(matches.get_one::<String>("mode").unwrap_or(&default_mode))?;
    let offset = matches.get_one::<i64>("offset").copied().unwrap_or(0);

    let annotations_path = matches
        .get_one::<String>("annotations")
        .context("A path to an annotation table is required.")?;
    let annotations = AnnotationIndex::try_from(Path::new(annotations_path))
        .with_context(|| format!("Failed to read annotations from {}", annotations_path))?;

    let links = match matches.get_one::<String>("links") {
        Some(path) => NameLinks::try_from(Path::new(path))
            .with_context(|| format!("Failed to read name links from {}", path))?,
        None => NameLinks::Identity,
    };

    let results = detect_fragments(matches)?;
    let evaluation = evaluate_fragments(&results, &annotations, &links, offset);
    info!(
        "Evaluated {} annotations in {} regions",
        evaluation.aggregator.annotations_processed, evaluation.aggregator.regions_processed
    );

    let output = matches.get_one::<String>("output").map(Path::new);
    let mut out = open_output(output)?;
    match mode {
        EvaluationMode::Table => serde_json::to_writer_pretty(&mut out, &evaluation.aggregator)?,
        EvaluationMode::Rmse => serde_json::to_writer_pretty(&mut out, &evaluation.rms.finish())?,
        EvaluationMode::Intensity => serde_json::to_writer_pretty(&mut out, &evaluation.intensities)?,
    }
    writeln!(out)?;
    out.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::evaluate::cli::create_evaluate_cli;

    #[rstest]
    #[case("table", EvaluationMode::Table)]
    #[case("RMSE", EvaluationMode::Rmse)]
    #[case("intensity", EvaluationMode::Intensity)]
    fn test_mode_from_str(#[case] s: &str, #[case] expected: EvaluationMode) {
        assert_eq!(EvaluationMode::from_str(s).unwrap(), expected);
    }

    #[rstest]
    fn test_negative_offset_is_accepted() {
        let matches = create_evaluate_cli()
            .try_get_matches_from([
                "evaluate", "-r", "regions.gff", "--reads", "reads.bed", "-a", "a.tsv", "--offset", "-3",
            ])
            .unwrap();
        assert_eq!(*matches.get_one::<i64>("offset").unwrap(), -3);
    }

    #[rstest]
    fn test_run_evaluate_writes_json_table() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("stats.json");
        let matches = create_evaluate_cli()
            .try_get_matches_from([
                "evaluate",
                "-r",
                "../tests/data/regions.gff",
                "--reads",
                "../tests/data/reads.bed",
                "-a",
                "../tests/data/annotations.tsv",
                "-o",
                output.to_str().unwrap(),
            ])
            .unwrap();

        run_evaluate(&matches).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["regions_processed"], 3);
        assert_eq!(json["table"]["experimental"]["error_5p"].as_object().unwrap().len(), 13);
    }
}
