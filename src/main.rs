// Veil - Reversible Sensitive-Information Guardrail
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

use veil::cli::{Cli, Commands};
use veil::config::{load_config_or_default, LoggingConfig};
use veil::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging follows the config file when it loads; commands report config errors themselves
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Veil - Reversible Sensitive-Information Guardrail"
    );

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            veil::log_error_with_context!(format!("{e:#}"), "Command execution failed");
            eprintln!("Error: {e:#}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors; flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Detect(args) => args.execute(&cli.config),
        Commands::Redact(args) => args.execute(&cli.config),
        Commands::Restore(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(&cli.config),
        Commands::Init(args) => args.execute(),
    }
}
