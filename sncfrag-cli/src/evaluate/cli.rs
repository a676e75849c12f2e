use clap::{Command, arg, value_parser};

use crate::common::{output_arg, with_read_input_args};
use crate::detect::cli::with_detector_args;

pub const EVALUATE_CMD: &str = "evaluate";
pub const DEFAULT_MODE: &str = "table";

pub fn create_evaluate_cli() -> Command {
    let command = Command::new(EVALUATE_CMD)
        .about("Detect fragments and compare them to reference annotations. Writes JSON.")
        .arg_required_else_help(true)
        .arg(
            arg!(-a --annotations <annotations> "Tab-delimited reference fragments (key, start, stop, evidence, reads, [name])")
                .required(true),
        )
        .arg(arg!(-l --links <links> "Tab-delimited table linking region identifiers to annotation keys"))
        .arg(
            arg!(--offset <offset> "Shift between predicted and annotated coordinates")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("0"),
        )
        .arg(
            arg!(-m --mode <mode> "What to report: table, rmse or intensity")
                .default_value(DEFAULT_MODE),
        )
        .arg(output_arg());

    with_detector_args(with_read_input_args(command))
}
