use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use runtime::ServerConfig;

/// HTTP listener and middleware settings for the ingress router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    /// Handler timeout in seconds; 0 disables the layer.
    #[serde(default)]
    pub timeout_sec: u64,
    #[serde(default)]
    pub cors_enabled: bool,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ApiIngressConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            bind_addr: format!("{}:{}", server.host, server.port),
            timeout_sec: server.timeout_sec,
            cors_enabled: server.cors_enabled,
            body_limit_bytes: server.body_limit_bytes,
        }
    }
}

impl ApiIngressConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", self.bind_addr, e))
    }

    pub fn handler_timeout(&self) -> Option<Duration> {
        (self.timeout_sec > 0).then(|| Duration::from_secs(self.timeout_sec))
    }
}
