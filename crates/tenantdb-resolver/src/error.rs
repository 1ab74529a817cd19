//! Error types for the resolver crate.

use tenantdb_core::{ConfigError, redacted_url};
use thiserror::Error;

/// Errors reported by a [`Driver`](crate::Driver) while opening a connection.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The URL or a property could not be understood by the driver.
    #[error("invalid connection url: {0}")]
    InvalidUrl(String),

    /// The server refused the connection (authentication, unknown database, ...).
    #[error("connection rejected: {0}")]
    Rejected(String),

    /// Network failure while connecting.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other driver failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors that can occur while resolving and opening a tenant connection.
#[derive(Debug, Error)]
pub enum ResolverError {
    /// The resolver was constructed from invalid configuration.
    #[error("invalid resolver configuration: {0}")]
    Config(#[from] ConfigError),

    /// The driver failed to open the resolved URL.
    #[error(
        "failed to open connection to '{}' with driver {driver}: {source}",
        redacted_url(.url)
    )]
    ConnectionFailed {
        url: String,
        driver: String,
        #[source]
        source: DriverError,
    },

    /// The driver reported success without producing a connection.
    #[error(
        "driver {driver} returned no connection, make sure the connection URL '{}' is valid for the driver",
        redacted_url(.url)
    )]
    NullConnection { url: String, driver: String },
}

impl ResolverError {
    /// The URL the failed call attempted, if the error happened at call time.
    ///
    /// This is the raw URL, including any password in its userinfo.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolverError::Config(_) => None,
            ResolverError::ConnectionFailed { url, .. }
            | ResolverError::NullConnection { url, .. } => Some(url.as_str()),
        }
    }
}
