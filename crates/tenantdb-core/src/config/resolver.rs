//! Connection resolver configuration.
//!
//! Defines how a tenant token turns into a connection URL and user:
//! - `connection_url_template` is used when the identity carries a tenant
//! - `fallback_connection_url` is used verbatim when it does not
//! - `user_template` optionally derives the `user` property from the tenant

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::properties::ConnectionProperties;

/// Placeholder replaced by the tenant token in URL and user templates.
pub const TENANT_PLACEHOLDER: &str = "{tenant}";

/// Immutable settings of a connection resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// URL with a `{tenant}` placeholder, e.g. `postgres://{tenant}.db.internal/app`.
    pub connection_url_template: String,

    /// URL used when no tenant is supplied. Typically the shared or default database.
    pub fallback_connection_url: String,

    /// Properties applied to every connection before credentials are merged.
    #[serde(default)]
    pub connection_properties: ConnectionProperties,

    /// Extra credential key that carries the tenant token.
    #[serde(default = "default_tenant_credential_key")]
    pub tenant_credential_key: String,

    /// Optional template for the connection user, e.g. `{tenant}_user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_template: Option<String>,
}

impl ResolverConfig {
    /// Create a configuration with default tenant key, no base properties and no user template.
    pub fn new(
        connection_url_template: impl Into<String>,
        fallback_connection_url: impl Into<String>,
    ) -> Self {
        Self {
            connection_url_template: connection_url_template.into(),
            fallback_connection_url: fallback_connection_url.into(),
            connection_properties: ConnectionProperties::default(),
            tenant_credential_key: default_tenant_credential_key(),
            user_template: None,
        }
    }

    #[must_use]
    pub fn with_connection_properties(mut self, properties: ConnectionProperties) -> Self {
        self.connection_properties = properties;
        self
    }

    #[must_use]
    pub fn with_tenant_credential_key(mut self, key: impl Into<String>) -> Self {
        self.tenant_credential_key = key.into();
        self
    }

    #[must_use]
    pub fn with_user_template(mut self, template: impl Into<String>) -> Self {
        self.user_template = Some(template.into());
        self
    }

    /// Reject empty required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connection_url_template.is_empty() {
            return Err(ConfigError::MissingField("connection_url_template"));
        }
        if self.fallback_connection_url.is_empty() {
            return Err(ConfigError::MissingField("fallback_connection_url"));
        }
        if self.tenant_credential_key.is_empty() {
            return Err(ConfigError::MissingField("tenant_credential_key"));
        }
        Ok(())
    }

    /// Whether tenant substitution can change the URL at all.
    pub fn template_has_placeholder(&self) -> bool {
        self.connection_url_template.contains(TENANT_PLACEHOLDER)
    }

    /// Whether the user template is present and can depend on the tenant.
    pub fn user_template_has_placeholder(&self) -> bool {
        self.user_template
            .as_deref()
            .is_some_and(|t| t.contains(TENANT_PLACEHOLDER))
    }
}

fn default_tenant_credential_key() -> String {
    "tenant".to_string()
}
