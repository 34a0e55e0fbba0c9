//! Process runtime shared by the bootstrap server: layered configuration
//! and tracing-based logging.

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, BackendConfig, CliArgs, ConfigError, LoggingConfig, ReconcileConfig, Section,
    ServerConfig,
};
