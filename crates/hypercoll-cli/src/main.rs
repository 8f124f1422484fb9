use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use hypercoll_cli::Args;

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

    info!(log_level:?; "Starting HyperColl");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = hypercoll_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &err).is_err() {
            writer = err.to_string();
        }

        error!("Failed\n{writer}");
        process::exit(1);
    }

    info!("Completed successfully");
}
