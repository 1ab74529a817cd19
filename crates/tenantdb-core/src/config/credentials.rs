//! Credential provider configuration.
//!
//! Selects where the `user` and `password` connection properties come from:
//! nowhere, static configuration, or extra credentials on the caller's
//! identity with a static fallback.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Configuration of the credential provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialsConfig {
    /// No credential properties are added.
    #[default]
    None,

    /// Fixed user and password for every connection.
    Static {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        /// Environment variable containing the password. Wins over `password`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password_env: Option<String>,
    },

    /// User and password read from the identity's extra credentials,
    /// falling back to the static values when the identity lacks them.
    ExtraCredential {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_credential_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password_credential_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password_env: Option<String>,
    },
}

impl CredentialsConfig {
    /// The statically configured user, if any.
    pub fn user(&self) -> Option<&str> {
        match self {
            CredentialsConfig::None => None,
            CredentialsConfig::Static { user, .. }
            | CredentialsConfig::ExtraCredential { user, .. } => user.as_deref(),
        }
    }

    /// The statically configured password, checking `password_env` first.
    pub fn password(&self) -> Option<String> {
        match self {
            CredentialsConfig::None => None,
            CredentialsConfig::Static {
                password,
                password_env,
                ..
            }
            | CredentialsConfig::ExtraCredential {
                password,
                password_env,
                ..
            } => resolve_password(password.as_deref(), password_env.as_deref()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let CredentialsConfig::ExtraCredential {
            user_credential_name,
            password_credential_name,
            ..
        } = self
        {
            let names = [user_credential_name, password_credential_name];
            if names.iter().all(|n| n.is_none()) {
                return Err(ConfigError::Config(
                    "extra_credential provider needs user_credential_name or password_credential_name"
                        .to_string(),
                ));
            }
            if names.iter().any(|n| n.as_deref() == Some("")) {
                return Err(ConfigError::Config(
                    "extra credential names must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn resolve_password(password: Option<&str>, password_env: Option<&str>) -> Option<String> {
    if let Some(env_var) = password_env
        && let Ok(password) = std::env::var(env_var)
    {
        return Some(password);
    }
    password.map(str::to_string)
}
