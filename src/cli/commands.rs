//! CLI command implementations
//!
//! Boot order for `start`: load config, build the runtime, construct the
//! server (which seeds the store and composes the pipeline), serve.

use std::path::Path;

use crate::http::{HttpServer, ServerConfig};
use crate::observability::Logger;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Start { config } => start(&config),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Start the HTTP server and serve until interrupted.
pub fn start(config_path: &Path) -> CliResult<()> {
    if !config_path.exists() {
        Logger::warn(
            "config_file_missing",
            &[("path", &config_path.display().to_string())],
        );
    }
    let config = ServerConfig::load(config_path)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create runtime: {}", e)))?;

    rt.block_on(HttpServer::new(config).start())
        .map_err(|e| CliError::boot_failed(e.to_string()))
}

/// Print the effective configuration (defaults applied) as JSON.
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
