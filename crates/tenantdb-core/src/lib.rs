//! # tenantdb-core
//!
//! Types shared by the tenantdb crates:
//! - [`Identity`]: the calling principal of one request, with its extra credentials
//! - [`ConnectionProperties`]: the property bag handed to a database driver
//! - [`config`]: YAML configuration for the connection resolver and credential providers

// Configuration types shared across all tenantdb crates
pub mod config;
pub mod identity;
pub mod properties;

pub use config::{
    ConfigError, CredentialsConfig, ObservabilityConfig, ResolverConfig, TENANT_PLACEHOLDER,
    TenantDbConfig,
};
pub use identity::Identity;
pub use properties::{ConnectionProperties, PASSWORD_PROPERTY, USER_PROPERTY, redacted_url};
