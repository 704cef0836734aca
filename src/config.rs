//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file. Every section is optional
//! and falls back to the defaults below, so the service also runs with no
//! config file at all. `AppConfig` is the root configuration struct.

use axum::http::HeaderValue;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Rarity results are drawn per request and must never be served from a cache
pub const CACHE_CONTROL_RARITY: &str = "no-store";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default bind address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default port, matching the address other marketplace services call
pub const DEFAULT_HTTP_PORT: u16 = 5002;

/// Seconds to wait for open connections to drain on shutdown
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Origin wildcard that permits every origin
pub const CORS_ANY_ORIGIN: &str = "*";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "rarity_service=info,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Log formats accepted in `[logging] format`
const LOG_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Cross-origin policy
    #[serde(default)]
    pub cors: CorsConfig,
    /// Rarity draw settings
    #[serde(default)]
    pub rarity: RarityConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Grace period for in-flight requests after SIGTERM/SIGINT
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_timeout() -> u64 {
        DEFAULT_SHUTDOWN_TIMEOUT_SECS
    }
}

/// Cross-origin resource sharing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. `["*"]` (default) permits any origin.
    #[serde(default = "CorsConfig::default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    fn default_allowed_origins() -> Vec<String> {
        vec![CORS_ANY_ORIGIN.to_string()]
    }

    /// True when the wildcard appears anywhere in the list, ignoring padding
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins
            .iter()
            .any(|o| o.trim() == CORS_ANY_ORIGIN)
    }
}

/// Rarity draw configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RarityConfig {
    /// Fixed RNG seed. Unset means seed from OS entropy.
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults.
    ///
    /// Only used for the default config path; an explicitly requested file
    /// that is missing should go through `load` and fail.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation(
                "http.port must be non-zero".to_string(),
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Validation(
                "cors.allowed_origins is empty. Use [\"*\"] to allow any origin".to_string(),
            ));
        }

        for origin in &self.cors.allowed_origins {
            let trimmed = origin.trim();
            if trimmed.is_empty() || trimmed.parse::<HeaderValue>().is_err() {
                return Err(ConfigError::Validation(format!(
                    "Invalid origin {:?} in cors.allowed_origins",
                    origin
                )));
            }
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown logging.format '{}' (expected \"text\" or \"json\")",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert_eq!(config.http.shutdown_timeout_seconds, DEFAULT_SHUTDOWN_TIMEOUT_SECS);
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.rarity.seed, None);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
[http]
host = "127.0.0.1"
port = 8081
shutdown_timeout_seconds = 5

[cors]
allowed_origins = ["http://localhost:3000"]

[rarity]
seed = 42

[logging]
format = "json"
"#,
        );

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.http.shutdown_timeout_seconds, 5);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
        assert!(!config.cors.allows_any_origin());
        assert_eq!(config.rarity.seed, Some(42));
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_shipped_default_config_loads() {
        let config =
            AppConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml")).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let config = AppConfig::from_toml("[http]\nport = 9000\n").unwrap();
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, DEFAULT_HTTP_HOST);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.http.port, DEFAULT_HTTP_PORT);
    }

    #[test]
    fn test_load_or_default_reads_existing_file() {
        let file = write_config("[http]\nport = 7000\n");
        let config = AppConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.http.port, 7000);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = AppConfig::from_toml("[http\nport = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = AppConfig::from_toml("[http]\nport = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_origins_rejected() {
        let err = AppConfig::from_toml("[cors]\nallowed_origins = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_padded_wildcard_allows_any_origin() {
        let config = AppConfig::from_toml("[cors]\nallowed_origins = [\" *\"]\n").unwrap();
        assert!(config.cors.allows_any_origin());

        let config =
            AppConfig::from_toml("[cors]\nallowed_origins = [\"http://a.example\", \"* \"]\n")
                .unwrap();
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_blank_origin_rejected() {
        let err = AppConfig::from_toml("[cors]\nallowed_origins = [\"  \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unparseable_origin_rejected() {
        let err = AppConfig::from_toml("[cors]\nallowed_origins = [\"http://a.example\\n\"]\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
