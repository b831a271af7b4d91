//! Merkledag CLI Binary
//!
//! Command-line interface for adding trees to and retrieving files from a
//! content-addressed Merkle DAG store.

use clap::Parser;
use merkledag::cli::{run, Cli};
use merkledag::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    match run(&cli) {
        Ok(output) => {
            info!("Command completed");
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Logging configuration from CLI flags over defaults; `MERKLEDAG_LOG`
/// still overrides both.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    config
}
