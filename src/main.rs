//! Main binary entry point for oxflib.

use clap::Parser;
use oxflib::Config;
use oxflib::errors::XmlMapError;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Convert an XML document into a JSON mapping", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", help = "XML input (defaults to stdin)")]
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE", help = "JSON output (defaults to stdout)")]
    output: Option<PathBuf>,

    #[arg(long, help = "Pretty-print the JSON output")]
    pretty: bool,

    #[arg(short, long, help = "Log progress and timings to stderr")]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let filter_level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter(None, filter_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app() -> Result<(), XmlMapError> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = Config {
        input_file: cli.input,
        output_file: cli.output,
        pretty: cli.pretty,
    };

    oxflib::run(config)
}

fn main() -> ExitCode {
    match run_app() {
        Ok(_) => {
            log::info!("Conversion completed successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("A fatal error occurred:");
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(s) = source {
                log::error!("  Caused by: {}", s);
                source = std::error::Error::source(s);
            }
            ExitCode::FAILURE
        }
    }
}
