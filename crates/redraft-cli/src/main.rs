//! Redraft CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use redraft_cli::{
    Args,
    error_adapter::{Reportable, diagnostics_to_reportables, to_reportables},
};

fn render(reporter: &GraphicalReportHandler, reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    reporter
        .render_report(&mut writer, reportable)
        .expect("Writing to String buffer is infallible");
    writer
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Redraft");
    debug!(args:?; "Parsed arguments");

    let reporter = GraphicalReportHandler::new();

    match redraft_cli::run(&args) {
        Ok(report) => {
            if args.report {
                for reportable in diagnostics_to_reportables(report.diagnostics()) {
                    eprintln!("{}", render(&reporter, &reportable));
                }
                eprintln!(
                    "{} edits applied, {} diagnostics",
                    report.applied(),
                    report.diagnostics().len()
                );
            }
        }
        Err(err) => {
            for reportable in to_reportables(&err) {
                error!("{}", render(&reporter, &reportable));
            }

            process::exit(1);
        }
    }

    info!("Completed successfully");
}
