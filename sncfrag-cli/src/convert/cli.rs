use clap::{Command, arg};

use crate::common::{output_arg, with_read_input_args};

pub const CONVERT_CMD: &str = "convert";

pub fn create_convert_cli() -> Command {
    let command = Command::new(CONVERT_CMD)
        .about("Write the reads of each region as BED or SAM text.")
        .arg_required_else_help(true)
        .arg(arg!(--to <format> "Output format (bed or sam)").required(true))
        .arg(output_arg());

    with_read_input_args(command)
}
