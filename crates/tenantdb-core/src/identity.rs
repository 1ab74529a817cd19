//! Caller identity carried with each connection request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The principal a connection is opened for.
///
/// Created by the session layer once per request. The resolver only reads it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user: String,
    #[serde(default)]
    extra_credentials: BTreeMap<String, String>,
}

impl Identity {
    /// Create an identity for `user` with no extra credentials.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            extra_credentials: BTreeMap::new(),
        }
    }

    /// Attach an extra credential (e.g. the tenant token).
    #[must_use]
    pub fn with_extra_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_credentials.insert(key.into(), value.into());
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn extra_credentials(&self) -> &BTreeMap<String, String> {
        &self.extra_credentials
    }

    /// Look up a single extra credential by key.
    pub fn extra_credential(&self, key: &str) -> Option<&str> {
        self.extra_credentials.get(key).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Identity
where
    K: Into<String>,
    V: Into<String>,
{
    /// Build an anonymous identity from extra credential pairs.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            user: String::new(),
            extra_credentials: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// Extra credentials may hold passwords, so only their keys are printed.
impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user", &self.user)
            .field(
                "extra_credentials",
                &self.extra_credentials.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
