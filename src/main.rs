/*!
 * Command-line interface for structgen
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use structgen::app;
use structgen::config::{Args, Config};
use structgen::logging::init_logging;
use structgen::report::{ReportFormat, Reporter};
use structgen::ConsoleHandler;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    // Create configuration
    let config = Config::from_args(args);

    if let Err(e) = init_logging(config.verbosity) {
        eprintln!("Warning: {}", e);
    }

    // Spinner only draws while the materializer reports progress, so it never
    // overlaps the overwrite prompt
    let progress = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}")
    {
        progress.set_style(style);
    }
    progress.set_prefix("📂 Creating");

    match app::run(&config, &ConsoleHandler, Arc::new(progress.clone())) {
        Ok(outcome) => {
            if config.dump_structure {
                match serde_json::to_string_pretty(&outcome.tree.as_dict()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Warning: could not serialize structure: {}", e),
                }
            }

            Reporter::new(ReportFormat::ConsoleTable).print_report(&outcome.report);
            println!("Done.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            progress.finish_and_clear();
            error!(error = %e, "run failed");
            eprintln!("\nERROR: {}\n", e);
            ExitCode::FAILURE
        }
    }
}
