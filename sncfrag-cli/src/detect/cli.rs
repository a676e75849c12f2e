use clap::{Command, arg, value_parser};

use crate::common::{output_arg, threads_arg, with_read_input_args};

pub const DETECT_CMD: &str = "detect";
pub const DEFAULT_FORMAT: &str = "bed";

/// Arguments that tune the detection, shared with `evaluate`
pub fn with_detector_args(command: Command) -> Command {
    command
        .arg(arg!(-c --config <config> "TOML file with detection parameters"))
        .arg(
            arg!(--"min-support" <min_support> "Minimum number of read boundaries for a peak")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"min-length" <min_length> "Shortest fragment that may be called")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"max-length" <max_length> "Longest fragment that may be called")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            arg!(--"max-overlap" <max_overlap> "Largest fraction two fragments may share")
                .value_parser(value_parser!(f64)),
        )
        .arg(arg!(--score <score> "How peak supports are combined (sum, min or product)"))
        .arg(threads_arg())
}

pub fn create_detect_cli() -> Command {
    let command = Command::new(DETECT_CMD)
        .about("Detect fragments from the start and stop densities of reads in each region.")
        .arg_required_else_help(true)
        .arg(output_arg())
        .arg(arg!(-f --format <format> "Output format (bed or table)").default_value(DEFAULT_FORMAT))
        .arg(arg!(--fasta <fasta> "FASTA file with the region sequences, adds a sequence column to tables"));

    with_detector_args(with_read_input_args(command))
}
