// EcoTrace 🌱 AGPL-3.0 License

use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use ecotrace_inference::cli::args::{ArgumentError, Cli};
use ecotrace_inference::cli::logging::set_verbose;
use ecotrace_inference::cli::predict::run_prediction;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            println!("{}", ArgumentError::from_clap(&err));
            process::exit(1);
        }
    };

    set_verbose(cli.verbose);

    if let Err(e) = run_prediction(&cli) {
        println!("{e}");
        process::exit(1);
    }
}
