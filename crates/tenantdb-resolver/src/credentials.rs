//! Credential providers.
//!
//! A provider turns the caller's [`Identity`] into connection properties that
//! the resolver layers on top of its base properties.

use std::sync::Arc;

use tenantdb_core::{
    ConnectionProperties, CredentialsConfig, Identity, PASSWORD_PROPERTY, USER_PROPERTY,
};

/// Yields the credential properties to merge for one identity.
pub trait CredentialPropertiesProvider: Send + Sync {
    fn credential_properties(&self, identity: &Identity) -> ConnectionProperties;
}

/// Adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialPropertiesProvider for NoCredentials {
    fn credential_properties(&self, _identity: &Identity) -> ConnectionProperties {
        ConnectionProperties::new()
    }
}

/// Same user and password for every identity.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    user: Option<String>,
    password: Option<String>,
}

impl StaticCredentials {
    pub fn new(user: Option<String>, password: Option<String>) -> Self {
        Self { user, password }
    }
}

impl CredentialPropertiesProvider for StaticCredentials {
    fn credential_properties(&self, _identity: &Identity) -> ConnectionProperties {
        credential_properties(self.user.as_deref(), self.password.as_deref())
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .finish()
    }
}

/// Reads user and password from extra credentials on the identity.
///
/// Each value falls back to the static one when the identity does not carry
/// the named credential, or when no name is configured for it.
#[derive(Debug, Clone, Default)]
pub struct ExtraCredentials {
    user_credential_name: Option<String>,
    password_credential_name: Option<String>,
    fallback: StaticCredentials,
}

impl ExtraCredentials {
    pub fn new(
        user_credential_name: Option<String>,
        password_credential_name: Option<String>,
        fallback: StaticCredentials,
    ) -> Self {
        Self {
            user_credential_name,
            password_credential_name,
            fallback,
        }
    }

    fn lookup<'a>(identity: &'a Identity, name: Option<&str>) -> Option<&'a str> {
        name.and_then(|name| identity.extra_credential(name))
    }
}

impl CredentialPropertiesProvider for ExtraCredentials {
    fn credential_properties(&self, identity: &Identity) -> ConnectionProperties {
        let user = Self::lookup(identity, self.user_credential_name.as_deref())
            .or(self.fallback.user.as_deref());
        let password = Self::lookup(identity, self.password_credential_name.as_deref())
            .or(self.fallback.password.as_deref());
        credential_properties(user, password)
    }
}

fn credential_properties(user: Option<&str>, password: Option<&str>) -> ConnectionProperties {
    let mut properties = ConnectionProperties::new();
    if let Some(user) = user {
        properties.insert(USER_PROPERTY, user);
    }
    if let Some(password) = password {
        properties.insert(PASSWORD_PROPERTY, password);
    }
    properties
}

/// Build the provider selected by configuration.
pub fn provider_from_config(config: &CredentialsConfig) -> Arc<dyn CredentialPropertiesProvider> {
    let fallback = || StaticCredentials::new(config.user().map(str::to_string), config.password());
    match config {
        CredentialsConfig::None => Arc::new(NoCredentials),
        CredentialsConfig::Static { .. } => Arc::new(fallback()),
        CredentialsConfig::ExtraCredential {
            user_credential_name,
            password_credential_name,
            ..
        } => Arc::new(ExtraCredentials::new(
            user_credential_name.clone(),
            password_credential_name.clone(),
            fallback(),
        )),
    }
}
