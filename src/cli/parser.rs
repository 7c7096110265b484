//! CLI argument parsing with clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

// Include shadow-rs generated build information
use shadow_rs::shadow;
shadow!(build);

/// GOLD production hub server
#[derive(Parser, Debug)]
#[command(name = "goldhub")]
#[command(about = "Production management hub for the printing plant")]
#[command(long_about = "
Goldhub serves the production-management API: the daily due-date report,
desktop notification dispatch, and plate order PDF generation.

EXAMPLES:
    # Start the server with default configuration
    goldhub serve

    # Start on a custom host and port
    goldhub serve --host 0.0.0.0 --port 8080

    # Use a specific configuration file
    goldhub --config /etc/goldhub/production.toml serve

    # Validate configuration without serving
    goldhub serve --dry-run

    # Apply pending database migrations
    goldhub migrate
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path (skips layered config loading)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override environment detection (development, test, staging, production)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the bind port
        #[arg(long)]
        port: Option<u16>,

        /// Validate configuration and exit without serving
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply pending database migrations
    Migrate,
}

/// CLI-facing environment choice, mapped onto the config environment.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    Test,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_overrides() {
        let cli = Cli::parse_from(["goldhub", "serve", "--host", "0.0.0.0", "--port", "9000"]);
        match cli.command {
            Some(Commands::Serve { host, port, dry_run }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_migrate() {
        let cli = Cli::parse_from(["goldhub", "migrate"]);
        assert!(matches!(cli.command, Some(Commands::Migrate)));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["goldhub", "-v", "-q"]).is_err());
    }
}
