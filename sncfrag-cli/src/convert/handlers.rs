use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use sncfrag_io::{ReadFormat, open_output, write_reads_bed, write_reads_sam};

use crate::common::{build_read_source, fetch_all, load_regions};

pub fn run_convert(matches: &ArgMatches) -> Result<()> {
    let format = matches
        .get_one::<String>("to")
        .context("An output format is required.")?;
    let format = ReadFormat::from_str(format)?;

    let regions = load_regions(matches)?;
    let source = build_read_source(matches)?;
    let reads = fetch_all(&regions, source.as_ref())?;

    let n_reads: usize = reads.iter().map(|(_, r)| r.len()).sum();
    info!("Converting {} reads from {} regions", n_reads, reads.len());

    let output = matches.get_one::<String>("output").map(Path::new);
    let mut out = open_output(output)?;
    let rows = reads.iter().map(|(region, r)| (*region, r.as_slice()));
    match format {
        ReadFormat::Bed => write_reads_bed(&mut out, rows)?,
        ReadFormat::Sam => write_reads_sam(&mut out, rows)?,
    }
    out.finish()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    use crate::convert::cli::create_convert_cli;

    #[rstest]
    #[case("bed")]
    #[case("sam")]
    fn test_run_convert(#[case] format: &str) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join(format!("reads.{}", format));
        let matches = create_convert_cli()
            .try_get_matches_from([
                "convert",
                "-r",
                "../tests/data/regions.gff",
                "--reads",
                "../tests/data/reads.bed",
                "--to",
                format,
                "-o",
                output.to_str().unwrap(),
            ])
            .unwrap();

        run_convert(&matches).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.lines().any(|l| l.starts_with("MIR-TEST\t") || l.contains("\tMIR-TEST\t")));
        if format == "sam" {
            assert!(text.starts_with("@HD\tVN:1.0\tSO:unsorted"));
        }
    }

    #[rstest]
    fn test_unknown_format() {
        let matches = create_convert_cli()
            .try_get_matches_from([
                "convert",
                "-r",
                "../tests/data/regions.gff",
                "--reads",
                "../tests/data/reads.bed",
                "--to",
                "bam",
            ])
            .unwrap();
        assert!(run_convert(&matches).is_err());
    }
}
