use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, arg, value_parser};
use log::{LevelFilter, info};

use sncfrag_core::ReadSource;
use sncfrag_core::models::{ReadInterval, Region, RegionList};
use sncfrag_core::utils::{FileType, get_file_info};
use sncfrag_io::{BamReadSource, BedReadSource};

pub fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    // RUST_LOG wins over the flags
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

///
/// Add the arguments shared by every subcommand that reads alignments: the region file
/// and the read input (BAM files or a BED read list).
///
pub fn with_read_input_args(command: Command) -> Command {
    command
        .arg(
            arg!(-r --regions <regions> "GFF/GTF file with the regions (precursors) to analyse")
                .required(true),
        )
        .arg(
            Arg::new("bam")
                .short('b')
                .long("bam")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("One or more BAM files, indexed on the fly when no up to date .bai exists"),
        )
        .arg(
            Arg::new("reads")
                .long("reads")
                .help("BED list of reads (chr, start, end, [name, [count]]), '-' for stdin"),
        )
        .group(
            ArgGroup::new("input")
                .args(["bam", "reads"])
                .required(true)
                .multiple(false),
        )
}

pub fn threads_arg() -> Arg {
    arg!(-t --threads <threads> "Number of worker threads")
        .value_parser(value_parser!(usize))
        .default_value("1")
}

pub fn output_arg() -> Arg {
    arg!(-o --output <output> "Output file ('-' or absent for stdout, .gz to compress)")
}

pub fn load_regions(matches: &ArgMatches) -> Result<RegionList> {
    let path = matches
        .get_one::<String>("regions")
        .context("A path to a region file is required.")?;

    let regions = RegionList::try_from(Path::new(path))
        .with_context(|| format!("Failed to read regions from {}", path))?;
    info!("Loaded {} regions from {}", regions.len(), path);

    Ok(regions)
}

///
/// Build the read source selected on the command line.
///
/// A BED read list may also be passed through `--bam` when its extension says so.
///
pub fn build_read_source(matches: &ArgMatches) -> Result<Box<dyn ReadSource>> {
    if let Some(reads) = matches.get_one::<String>("reads") {
        let source = BedReadSource::try_from(reads.as_str())
            .with_context(|| format!("Failed to load reads from {}", reads))?;
        return Ok(Box::new(source));
    }

    let paths: Vec<PathBuf> = matches
        .get_many::<String>("bam")
        .context("Either --bam or --reads is required.")?
        .map(PathBuf::from)
        .collect();

    if let [single] = paths.as_slice() {
        if get_file_info(single).file_type == FileType::BED {
            let source = BedReadSource::try_from(single.as_path())
                .with_context(|| format!("Failed to load reads from {}", single.display()))?;
            return Ok(Box::new(source));
        }
    }

    let source = BamReadSource::new(&paths).context("Failed to open alignment files")?;
    if source.paths().is_empty() {
        anyhow::bail!("None of the alignment files could be used");
    }
    Ok(Box::new(source))
}

///
/// Fetch the reads of every region, in region order.
///
pub fn fetch_all<'a>(
    regions: &'a RegionList,
    source: &dyn ReadSource,
) -> Result<Vec<(&'a Region, Vec<ReadInterval>)>> {
    regions
        .iter()
        .map(|region| {
            let reads = source
                .fetch(region)
                .with_context(|| format!("Failed to fetch reads for {}", region))?;
            Ok((region, reads))
        })
        .collect()
}
