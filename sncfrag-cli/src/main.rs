mod common;
mod convert;
mod detect;
mod evaluate;

use anyhow::Result;
use clap::{Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "sncfrag";
    pub const BIN_NAME: &str = "sncfrag";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("sncfrag developers")
        .about("Annotate fragments of small non-coding RNAs from the start and stop positions of aligned reads.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Log every region and the size of each detection stage").global(true))
        .arg(arg!(-q --quiet "Only log warnings and errors").global(true))
        .subcommand(detect::cli::create_detect_cli())
        .subcommand(evaluate::cli::create_evaluate_cli())
        .subcommand(convert::cli::create_convert_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    common::init_logging(matches.get_flag("verbose"), matches.get_flag("quiet"));

    match matches.subcommand() {
        //
        // DETECT
        //
        Some((detect::cli::DETECT_CMD, matches)) => {
            detect::handlers::run_detect(matches)?;
        }

        //
        // EVALUATE
        //
        Some((evaluate::cli::EVALUATE_CMD, matches)) => {
            evaluate::handlers::run_evaluate(matches)?;
        }

        //
        // CONVERT
        //
        Some((convert::cli::CONVERT_CMD, matches)) => {
            convert::handlers::run_convert(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_flags_after_subcommand() {
        let matches = build_parser()
            .try_get_matches_from([
                "sncfrag", "detect", "-r", "regions.gff", "--reads", "reads.bed", "-v",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }

    #[rstest]
    fn test_input_is_required() {
        let result = build_parser().try_get_matches_from(["sncfrag", "detect", "-r", "regions.gff"]);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_bam_and_reads_conflict() {
        let result = build_parser().try_get_matches_from([
            "sncfrag", "convert", "-r", "regions.gff", "-b", "a.bam", "--reads", "reads.bed", "--to", "sam",
        ]);
        assert!(result.is_err());
    }
}
