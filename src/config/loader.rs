//! Configuration loader handling layered loading with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "GOLD_CONFIG_DIR";

/// Environment variable for a specific configuration file
const CONFIG_FILE_ENV: &str = "GOLD_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "GOLD";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Layered configuration loader.
///
/// Sources in order of priority:
/// 1. `default.toml` - base configuration
/// 2. `{environment}.toml` - environment-specific overrides (optional)
/// 3. `local.toml` - local development overrides (optional)
/// 4. `GOLD_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader that reads a single explicit configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.as_ref().to_path_buf()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the detected environment.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// The environment this loader resolves configuration for.
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load and deserialize the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            if !file.exists() {
                return Err(ConfigError::file_not_found(file.display().to_string()));
            }
            builder = builder.add_source(File::from(file.clone()).format(FileFormat::Toml));
        } else {
            let default_file = self.config_dir.join("default.toml");
            builder = builder
                .add_source(File::from(default_file).format(FileFormat::Toml).required(false))
                .add_source(
                    File::from(self.config_dir.join(format!("{}.toml", self.environment)))
                        .format(FileFormat::Toml)
                        .required(false),
                )
                .add_source(
                    File::from(self.config_dir.join("local.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                );
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_defaults_when_no_files_exist() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from("/nonexistent"),
            config_file: None,
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().expect("defaults should deserialize");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.automation.poll_max_attempts, 90);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9090").unwrap();

        let loader = ConfigLoader::from_file(&path);
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let loader = ConfigLoader::from_file("/nonexistent/config.toml");
        assert!(loader.load().is_err());
    }
}
