use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::service::ServiceConfig;

/// Configuration for the session_bootstrap module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionBootstrapConfig {
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default)]
    pub hard_delete: bool,
    #[serde(default)]
    pub mark_messages_deleted: bool,
    /// 0 disables background reconciliation.
    #[serde(default)]
    pub reconcile_interval_sec: u64,
}

impl SessionBootstrapConfig {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            call_timeout: Duration::from_millis(self.request_timeout_ms),
            max_in_flight: self.max_in_flight.max(1),
        }
    }

    pub fn reconcile_interval(&self) -> Option<Duration> {
        (self.reconcile_interval_sec > 0).then(|| Duration::from_secs(self.reconcile_interval_sec))
    }
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
