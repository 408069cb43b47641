//! CLI argument definitions using clap
//!
//! Commands:
//! - rosterd start --config <path>
//! - rosterd check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rosterd - a small, self-hostable in-memory user record service
#[derive(Parser, Debug)]
#[command(name = "rosterd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the rosterd HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./rosterd.json")]
        config: PathBuf,
    },

    /// Print the effective configuration and exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./rosterd.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_start_uses_default_config_path() {
        let cli = Cli::parse_from(["rosterd", "start"]);
        match cli.command {
            Command::Start { config } => assert_eq!(config, Path::new("./rosterd.json")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_explicit_config_path() {
        let cli = Cli::parse_from(["rosterd", "check-config", "--config", "/etc/rosterd.json"]);
        match cli.command {
            Command::CheckConfig { config } => {
                assert_eq!(config, Path::new("/etc/rosterd.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
