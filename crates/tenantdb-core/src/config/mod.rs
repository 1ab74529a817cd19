//! Configuration types for tenantdb.
//!
//! A single YAML document (`tenantdb.yaml`) configures the connection
//! resolver, the credential provider it merges properties from, and the
//! logging/tracing setup of the binary.
//!
//! # Example
//!
//! ```yaml
//! resolver:
//!   connection_url_template: "postgres://{tenant}.db.internal:5432/app"
//!   fallback_connection_url: "postgres://shared.db.internal:5432/app"
//!   user_template: "{tenant}_user"
//!   connection_properties:
//!     application_name: tenantdb
//!
//! credentials:
//!   type: static
//!   password_env: TENANTDB_PASSWORD
//! ```

pub mod credentials;
pub mod resolver;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use credentials::CredentialsConfig;
pub use resolver::{ResolverConfig, TENANT_PLACEHOLDER};

/// Complete tenantdb configuration loaded from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDbConfig {
    /// URL templates and base properties for the connection resolver.
    pub resolver: ResolverConfig,

    /// Which credential provider to merge connection properties from.
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Logging and tracing settings.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Whether connection opens are recorded as tracing spans.
    #[serde(default = "default_true")]
    pub tracing: bool,

    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            tracing: true,
            log_level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing required configuration field: {0}")]
    MissingField(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TenantDbConfig {
    /// Load configuration from a YAML file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content and validate it.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section for missing or inconsistent values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate()?;
        self.credentials.validate()
    }
}
