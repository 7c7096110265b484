//! Configuration settings structures for goldhub
//!
//! Defines all configuration sections that can be loaded from TOML files
//! and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "goldhub".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_jwt_secret() -> String {
    String::new()
}

fn default_access_token_expiration() -> i64 {
    1 // hours
}

fn default_refresh_token_expiration() -> i64 {
    168 // 7 days
}

fn default_daemon_url() -> String {
    "http://127.0.0.1:5341/notify".to_string()
}

fn default_notifier_timeout_ms() -> u64 {
    800
}

fn default_artifact_root() -> String {
    "/mnt/production/barcodes".to_string()
}

fn default_hotfolder() -> String {
    "/mnt/production/hotfolder".to_string()
}

fn default_poll_interval_seconds() -> u64 {
    1
}

fn default_poll_max_attempts() -> u32 {
    90
}

fn default_true() -> bool {
    true
}

fn default_digest_cron() -> String {
    // 06:45 every day, server-local time
    "0 45 6 * * *".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// The socket address string to bind to
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; falls back to the DATABASE_URL environment variable
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,
}

impl DatabaseConfig {
    /// Resolve the connection URL from config or the environment.
    pub fn resolve_url(&self) -> Result<String, ConfigError> {
        if let Some(url) = &self.url {
            if !url.is_empty() {
                return Ok(url.clone());
            }
        }
        std::env::var("DATABASE_URL").map_err(|_| {
            ConfigError::EnvVarError(
                "database.url is not configured and DATABASE_URL is not set".to_string(),
            )
        })
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
        }
    }
}

// ============================================================================
// JWT Configuration
// ============================================================================

/// JWT signing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret; must be non-empty and at least 32 bytes
    #[serde(default = "default_jwt_secret")]
    pub secret: String,

    /// Access token lifetime in hours
    #[serde(default = "default_access_token_expiration")]
    pub access_token_expiration: i64,

    /// Refresh token lifetime in hours
    #[serde(default = "default_refresh_token_expiration")]
    pub refresh_token_expiration: i64,
}

impl JwtConfig {
    /// Validate the JWT configuration before serving requests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation("jwt.secret", "secret must not be empty"));
        }
        if self.secret.len() < 32 {
            return Err(ConfigError::validation(
                "jwt.secret",
                "secret must be at least 32 bytes",
            ));
        }
        if self.access_token_expiration <= 0 || self.refresh_token_expiration <= 0 {
            return Err(ConfigError::validation(
                "jwt.access_token_expiration",
                "token expirations must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_jwt_secret(),
            access_token_expiration: default_access_token_expiration(),
            refresh_token_expiration: default_refresh_token_expiration(),
        }
    }
}

// ============================================================================
// Notifier Configuration
// ============================================================================

/// Desktop notification daemon configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Notification daemon endpoint
    #[serde(default = "default_daemon_url")]
    pub daemon_url: String,

    /// Delivery timeout in milliseconds; the bridge must never stall a
    /// request thread for longer than this
    #[serde(default = "default_notifier_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional icon path forwarded to the daemon
    #[serde(default)]
    pub icon: Option<String>,
}

impl NotifierConfig {
    /// Environment variable overriding the daemon endpoint.
    pub const ENDPOINT_ENV: &'static str = "NOTIFICATION_DAEMON_URL";

    /// Resolve the daemon endpoint, honoring the environment override.
    pub fn endpoint(&self) -> String {
        std::env::var(Self::ENDPOINT_ENV).unwrap_or_else(|_| self.daemon_url.clone())
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            daemon_url: default_daemon_url(),
            timeout_ms: default_notifier_timeout_ms(),
            icon: None,
        }
    }
}

// ============================================================================
// Automation Engine Configuration
// ============================================================================

/// Automation engine artifact store and polling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Root directory where the engine writes barcode artifacts
    #[serde(default = "default_artifact_root")]
    pub artifact_root: String,

    /// Hotfolder where creation requests are dropped for the engine
    #[serde(default = "default_hotfolder")]
    pub hotfolder: String,

    /// Seconds between artifact existence polls
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,

    /// Polling attempts before giving up; sized at ~1.5x the engine's own
    /// 60-second scan cadence by default
    #[serde(default = "default_poll_max_attempts")]
    pub poll_max_attempts: u32,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            artifact_root: default_artifact_root(),
            hotfolder: default_hotfolder(),
            poll_interval_seconds: default_poll_interval_seconds(),
            poll_max_attempts: default_poll_max_attempts(),
        }
    }
}

// ============================================================================
// Digest Configuration
// ============================================================================

/// Morning digest background job configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Whether the digest job is scheduled at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Six-field cron expression for the digest dispatch
    #[serde(default = "default_digest_cron")]
    pub cron: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            cron: default_digest_cron(),
        }
    }
}

// ============================================================================
// Top-level Settings
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub jwt: JwtConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub automation: AutomationConfig,

    #[serde(default)]
    pub digest: DigestConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.notifier.timeout_ms, 800);
        assert_eq!(settings.automation.poll_max_attempts, 90);
        assert_eq!(settings.automation.poll_interval_seconds, 1);
    }

    #[test]
    fn jwt_validation_rejects_short_secret() {
        let config = JwtConfig {
            secret: "short".to_string(),
            ..JwtConfig::default()
        };
        assert!(config.validate().is_err());

        let config = JwtConfig {
            secret: "a".repeat(32),
            ..JwtConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn notifier_endpoint_defaults_to_config() {
        let config = NotifierConfig::default();
        // The override variable is not set in the test environment.
        if std::env::var(NotifierConfig::ENDPOINT_ENV).is_err() {
            assert_eq!(config.endpoint(), "http://127.0.0.1:5341/notify");
        }
    }
}
