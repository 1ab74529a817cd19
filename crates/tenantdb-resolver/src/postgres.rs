//! Postgres [`Driver`] backed by `sqlx`.
//!
//! Accepts `postgres://` and `postgresql://` URLs, optionally prefixed with
//! `jdbc:`. Connection properties map onto [`PgConnectOptions`]:
//!
//! | Property | Option |
//! |----------|--------|
//! | `user` | username |
//! | `password` | password |
//! | `host` | host |
//! | `port` | port |
//! | `dbname` | database |
//! | `application_name` | application name |
//! | `sslmode` | SSL mode (`disable`, `prefer`, `require`, ...) |
//! | `sslrootcert` | CA certificate path |
//! | `sslcert` | client certificate path |
//! | `sslkey` | client key path |
//! | `connect_timeout` | ignored; sqlx has no per-connection timeout |
//! | anything else | server runtime parameter (`-c key=value`) |

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgSslMode};
use tenantdb_core::{ConnectionProperties, PASSWORD_PROPERTY, USER_PROPERTY, redacted_url};

use crate::driver::Driver;
use crate::error::DriverError;

const JDBC_PREFIX: &str = "jdbc:";
const SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Opens single, unpooled `PgConnection`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDriver;

impl PostgresDriver {
    pub fn new() -> Self {
        Self
    }

    /// Strip an optional `jdbc:` prefix and return the URL if it is a Postgres URL.
    fn accept_url(url: &str) -> Option<&str> {
        let url = url.strip_prefix(JDBC_PREFIX).unwrap_or(url);
        SCHEMES
            .iter()
            .any(|scheme| url.starts_with(scheme))
            .then_some(url)
    }

    /// Build connect options for `url` with `properties` applied.
    ///
    /// Returns `Ok(None)` for URLs this driver does not handle.
    pub fn connect_options(
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Option<PgConnectOptions>, DriverError> {
        let Some(url) = Self::accept_url(url) else {
            return Ok(None);
        };

        let mut options = PgConnectOptions::from_str(url).map_err(map_sqlx_error)?;
        let mut runtime_params = Vec::new();

        for (key, value) in properties {
            options = match key.as_str() {
                USER_PROPERTY => options.username(value),
                PASSWORD_PROPERTY => options.password(value),
                "host" => options.host(value),
                "port" => {
                    let port = value.parse::<u16>().map_err(|_| {
                        DriverError::InvalidUrl(format!("invalid port '{value}'"))
                    })?;
                    options.port(port)
                }
                "dbname" => options.database(value),
                "application_name" => options.application_name(value),
                "sslmode" => {
                    let mode = PgSslMode::from_str(value).map_err(|_| {
                        DriverError::InvalidUrl(format!("unknown sslmode '{value}'"))
                    })?;
                    options.ssl_mode(mode)
                }
                "sslrootcert" => options.ssl_root_cert(value.as_str()),
                "sslcert" => options.ssl_client_cert(value.as_str()),
                "sslkey" => options.ssl_client_key(value.as_str()),
                // Client-side libpq setting; the server rejects it as a GUC.
                "connect_timeout" => {
                    tracing::debug!(value = %value, "Ignoring connect_timeout property");
                    options
                }
                _ => {
                    runtime_params.push((key, value));
                    options
                }
            };
        }

        if !runtime_params.is_empty() {
            options = options.options(runtime_params);
        }
        Ok(Some(options))
    }
}

#[async_trait]
impl Driver for PostgresDriver {
    type Connection = PgConnection;

    fn name(&self) -> &str {
        "postgres"
    }

    async fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Option<PgConnection>, DriverError> {
        let Some(options) = Self::connect_options(url, properties)? else {
            tracing::debug!(url = %redacted_url(url), "URL not handled by postgres driver");
            return Ok(None);
        };

        let connection = options.connect().await.map_err(map_sqlx_error)?;
        Ok(Some(connection))
    }
}

fn map_sqlx_error(err: sqlx::Error) -> DriverError {
    match err {
        sqlx::Error::Configuration(e) => DriverError::InvalidUrl(e.to_string()),
        sqlx::Error::Database(e) => DriverError::Rejected(e.to_string()),
        sqlx::Error::Io(e) => DriverError::Io(e),
        other => DriverError::Other(anyhow::Error::new(other)),
    }
}
