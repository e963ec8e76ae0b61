//! Table store client configuration.

use std::env;

use serde::{Deserialize, Serialize};

/// Client-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStoreConfig {
    /// Instance used when a call names none.
    pub default_instance: String,
    /// Connection pool size per instance, read by transport bindings.
    pub pool_size: usize,
    /// Extra connections allowed above `pool_size`.
    pub pool_max_overflow: usize,
    /// Request a secondary pool for change-stream consumption.
    pub enable_tunnel: bool,
    /// Log filter directive.
    pub log_level: String,
}

impl TableStoreConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_instance: env::var("TABLESTORE_DEFAULT_INSTANCE")
                .unwrap_or(defaults.default_instance),
            pool_size: env_usize("TABLESTORE_POOL_SIZE", defaults.pool_size),
            pool_max_overflow: env_usize("TABLESTORE_POOL_MAX_OVERFLOW", defaults.pool_max_overflow),
            enable_tunnel: env_bool("TABLESTORE_ENABLE_TUNNEL", defaults.enable_tunnel),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for TableStoreConfig {
    fn default() -> Self {
        Self {
            default_instance: "default".to_owned(),
            pool_size: 100,
            pool_max_overflow: 20,
            enable_tunnel: false,
            log_level: "info".to_owned(),
        }
    }
}

/// Settings for one registered instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceConfig {
    /// Instance id used to route calls.
    pub name: String,
    /// Service endpoint the transport connects to.
    pub endpoint: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Extra connections allowed above `pool_size`.
    pub pool_max_overflow: usize,
    /// Whether a change-stream pool is requested.
    pub enable_tunnel: bool,
}

impl InstanceConfig {
    /// Instance settings inheriting pool options from the client config.
    #[must_use]
    pub fn from_config(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        config: &TableStoreConfig,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            pool_size: config.pool_size,
            pool_max_overflow: config.pool_max_overflow,
            enable_tunnel: config.enable_tunnel,
        }
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
