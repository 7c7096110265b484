//! Command-line interface: argument parsing and settings resolution.

pub mod parser;

pub use parser::{Cli, Commands};

use crate::config::settings::Settings;
use crate::config::{ConfigLoader, Environment};

/// Resolve settings from configuration files and CLI overrides.
///
/// Precedence: config files and GOLD_* environment variables first, then
/// the explicit command-line flags on top.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };
    let loader = match cli.env {
        Some(env) => loader.with_environment(Environment::from(env)),
        None => loader,
    };

    let mut settings = loader.load()?;

    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    Ok(settings)
}

/// Apply serve-command flag overrides onto the settings.
pub fn apply_serve_overrides(settings: &mut Settings, host: &Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        settings.server.host = host.clone();
    }
    if let Some(port) = port {
        settings.server.port = port;
    }
}
