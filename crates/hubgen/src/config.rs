// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Loaded from a TOML file and passed by value into the generator.

use crate::handle;
use hubgen_runtime::QueuePolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubGenConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Metadata document (YAML or JSON), relative to the configuration file.
    #[serde(default)]
    pub metadata: Option<PathBuf>,

    /// Output TypeScript module, relative to the configuration file; stdout
    /// when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Hub roots and traversal settings.
    #[serde(default)]
    pub hub: HubConfig,

    /// Module specifiers of the generated imports.
    #[serde(default)]
    pub imports: ImportsConfig,

    /// Offline queue bounds and timers.
    #[serde(default)]
    pub queue: QueuePolicy,

    #[serde(default)]
    pub emit: EmitConfig,

    /// Type handle -> TypeScript type overrides.
    #[serde(default = "default_substitutions")]
    pub substitutions: BTreeMap<String, String>,
}

/// Hub roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubConfig {
    /// Server hub interface, e.g. `Orders.IOrderHub`.
    #[serde(default)]
    pub server: String,

    /// Client callback interface, e.g. `Orders.IOrderClient`.
    #[serde(default)]
    pub client: String,

    /// Hub path handed to the connection provider.
    #[serde(default = "default_hub_path")]
    pub path: String,

    /// Namespace prefix of the types to declare; empty keeps every
    /// namespaced type.
    #[serde(default)]
    pub namespace_filter: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            client: String::new(),
            path: default_hub_path(),
            namespace_filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportsConfig {
    /// Exported name of the connection provider type.
    #[serde(default = "default_provider_type")]
    pub connection_provider_type: String,

    #[serde(default = "default_provider_module")]
    pub connection_provider_module: String,

    #[serde(default = "default_signalr_module")]
    pub signalr_module: String,

    #[serde(default = "default_events_module")]
    pub events_module: String,
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            connection_provider_type: default_provider_type(),
            connection_provider_module: default_provider_module(),
            signalr_module: default_signalr_module(),
            events_module: default_events_module(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitConfig {
    /// Lower-case the first letter of emitted property and method names.
    #[serde(default)]
    pub camel_case_members: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_hub_path() -> String {
    "hub/".to_string()
}

fn default_provider_type() -> String {
    "IConnectionProvider".to_string()
}

fn default_provider_module() -> String {
    "./connection-provider".to_string()
}

fn default_signalr_module() -> String {
    "@microsoft/signalr".to_string()
}

fn default_events_module() -> String {
    "strongly-typed-events".to_string()
}

fn default_substitutions() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("System.DateTime".to_string(), "string".to_string()),
        ("System.Uri".to_string(), "string".to_string()),
    ])
}

impl Default for HubGenConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            metadata: None,
            output: None,
            hub: HubConfig::default(),
            imports: ImportsConfig::default(),
            queue: QueuePolicy::default(),
            emit: EmitConfig::default(),
            substitutions: default_substitutions(),
        }
    }
}

impl HubGenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration for one hub pair, everything else default.
    pub fn for_hub(server: impl Into<String>, client: impl Into<String>) -> Self {
        Self {
            hub: HubConfig {
                server: server.into(),
                client: client.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Sample configuration written by `gen-config`.
    pub fn example() -> Self {
        let mut config = Self::for_hub("Orders.IOrderHub", "Orders.IOrderClient");
        config.hub.namespace_filter = "Orders".into();
        config.hub.path = "hubs/orders".into();
        config.metadata = Some(PathBuf::from("orders.yaml"));
        config.output = Some(PathBuf::from("src/generated/order-hub.ts"));
        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (role, root) in [("server", &self.hub.server), ("client", &self.hub.client)] {
            if root.is_empty() {
                return Err(ConfigError::Invalid(format!("hub.{} is not set", role)));
            }
            handle::parse(root)
                .map_err(|e| ConfigError::Invalid(format!("hub.{}: {}", role, e)))?;
        }
        if self.hub.server == self.hub.client {
            return Err(ConfigError::Invalid(
                "hub.server and hub.client name the same type".into(),
            ));
        }

        if self.queue.max_queue_count == 0 {
            return Err(ConfigError::Invalid(
                "queue.max_queue_count must be positive".into(),
            ));
        }
        if self.queue.queue_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "queue.queue_timeout_secs must be positive".into(),
            ));
        }
        if self.queue.offline_queue_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "queue.offline_queue_interval_secs must be positive".into(),
            ));
        }

        if self.imports.connection_provider_type.is_empty() {
            return Err(ConfigError::Invalid(
                "imports.connection_provider_type is empty".into(),
            ));
        }

        for (from, to) in &self.substitutions {
            handle::parse(from)
                .map_err(|e| ConfigError::Invalid(format!("substitution '{}': {}", from, e)))?;
            if to.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "substitution '{}' has an empty target",
                    from
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = HubGenConfig::from_toml_str(
            "[hub]\nserver = \"Orders.IOrderHub\"\nclient = \"Orders.IOrderClient\"\n",
        )
        .expect("config");

        assert_eq!(config.log_level, "info");
        assert_eq!(config.hub.path, "hub/");
        assert_eq!(config.hub.namespace_filter, "");
        assert_eq!(config.queue, QueuePolicy::default());
        assert_eq!(config.imports.signalr_module, "@microsoft/signalr");
        assert_eq!(
            config.substitutions.get("System.DateTime").map(String::as_str),
            Some("string")
        );
        assert!(!config.emit.camel_case_members);
    }

    #[test]
    fn test_queue_override() {
        let config = HubGenConfig::from_toml_str(
            "[hub]\nserver = \"A.IHub\"\nclient = \"A.IClient\"\n\n[queue]\nmax_queue_count = 10\n",
        )
        .expect("config");
        assert_eq!(config.queue.max_queue_count, 10);
        assert_eq!(config.queue.queue_timeout_secs, 60);
    }

    #[test]
    fn test_config_validation() {
        let mut config = HubGenConfig::default();
        assert!(config.validate().is_err()); // No roots

        config.hub.server = "A.IHub".into();
        config.hub.client = "A.IHub".into();
        assert!(config.validate().is_err()); // Same root

        config.hub.client = "A.IClient".into();
        assert!(config.validate().is_ok());

        config.hub.client = "A.IClient<".into();
        assert!(config.validate().is_err());

        config.hub.client = "A.IClient".into();
        config.queue.queue_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.queue = QueuePolicy::default().with_max_queue_count(0);
        assert!(config.validate().is_err()); // Every offline call rejected

        config.queue = QueuePolicy::default();
        config.substitutions.insert("A.Money".into(), " ".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = HubGenConfig::example();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        assert!(toml_str.contains("server = \"Orders.IOrderHub\""));
        assert!(toml_str.contains("max_queue_count = 100"));

        let back = HubGenConfig::from_toml_str(&toml_str).expect("parse back");
        assert_eq!(back, config);
    }
}
