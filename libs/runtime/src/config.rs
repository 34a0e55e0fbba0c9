use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP listener configuration.
    pub server: ServerConfig,
    /// Messaging backend credentials and call limits.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Directory reconciliation schedule.
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base directory for relative log paths. Empty means the working directory.
    #[serde(default)]
    pub home_dir: String,
    pub host: String,
    pub port: u16,
    /// Per-request handler timeout in seconds (0 disables it).
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline applied to every backend call.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Upper bound on concurrent delete requests during reconciliation.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default)]
    pub hard_delete: bool,
    #[serde(default)]
    pub mark_messages_deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    /// Seconds between background reconciliation passes. 0 runs only at startup.
    #[serde(default)]
    pub interval_sec: u64,
}

/// Logging configuration - maps subsystem names to their logging settings.
/// Key "default" is the catch-all for logs that don't match explicit subsystems.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    pub console_level: String, // "info", "debug", "error", "off"
    #[serde(default)]
    pub file: String, // "logs/bootstrap.log"
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

/// Startup-fatal configuration problems.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),
    #[error("invalid listen port: {0}")]
    InvalidPort(u16),
    #[error("invalid backend base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("backend.max_in_flight must be at least 1")]
    InvalidConcurrency,
    #[error("backend.request_timeout_ms must be at least 1")]
    InvalidTimeout,
}

fn default_true() -> bool {
    true
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_base_url() -> String {
    "https://chat.stream-io-api.com".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_max_in_flight() -> usize {
    8
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_dir: String::new(),
            host: "0.0.0.0".to_string(),
            port: 3001,
            timeout_sec: 30,
            cors_enabled: true,
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            max_in_flight: default_max_in_flight(),
            hard_delete: false,
            mark_messages_deleted: false,
        }
    }
}

/// Create a default logging configuration.
pub fn default_logging_config() -> LoggingConfig {
    let mut logging = HashMap::new();
    logging.insert(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/bootstrap.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    );
    logging
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            reconcile: ReconcileConfig::default(),
            logging: Some(default_logging_config()),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading:
    /// defaults → YAML file (if any) → `APP__` env → legacy flat env (`PORT`, `API_KEY`, `API_SECRET`).
    pub fn load_layered(config_path: Option<&Path>) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        let config: AppConfig = figment
            // Example: APP__BACKEND__MAX_IN_FLIGHT=4 maps to backend.max_in_flight
            .merge(Env::prefixed("APP__").split("__"))
            .merge(
                Env::raw()
                    .only(&["PORT", "API_KEY", "API_SECRET"])
                    .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
                        "port" => "server.port".into(),
                        "api_key" => "backend.api_key".into(),
                        _ => "backend.api_secret".into(),
                    }),
            )
            .extract()
            .context("Failed to extract config from figment")?;

        Ok(config)
    }

    /// Load from an optional YAML file; without one, defaults plus environment apply.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        let path = config_path.map(|p| p.as_ref().to_path_buf());
        if let Some(p) = &path {
            if !p.exists() {
                anyhow::bail!("Config file not found: {}", p.display());
            }
        }
        Self::load_layered(path.as_deref())
    }

    /// Check everything the listener and backend client need before startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("backend.api_key"));
        }
        if self.backend.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingCredential("backend.api_secret"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort(self.server.port));
        }
        if let Err(e) = Url::parse(&self.backend.base_url) {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.backend.base_url.clone(),
                reason: e.to_string(),
            });
        }
        if self.backend.max_in_flight == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        if self.backend.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Base directory used to resolve relative log file paths.
    pub fn home_dir(&self) -> PathBuf {
        if self.server.home_dir.trim().is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.server.home_dir)
        }
    }

    /// Serialize configuration to YAML with the API secret masked.
    pub fn to_yaml(&self) -> Result<String> {
        let mut shown = self.clone();
        if !shown.backend.api_secret.is_empty() {
            shown.backend.api_secret = "********".to_string();
        }
        serde_yaml::to_string(&shown).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        // Set logging level based on verbose flags for "default" section.
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(default_section) = logging.get_mut("default") {
            default_section.console_level = match args.verbose {
                0 => default_section.console_level.clone(), // keep
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}
