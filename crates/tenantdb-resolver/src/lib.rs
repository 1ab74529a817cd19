//! # tenantdb-resolver
//!
//! Resolves, per request, which database URL and credentials to use based on
//! a tenant token carried on the caller's [`Identity`], then opens a traced
//! connection through a [`Driver`].
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tenantdb_core::{Identity, ResolverConfig};
//! use tenantdb_resolver::{ConnectionResolver, NoCredentials, PostgresDriver, TracingTraceSink};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ResolverConfig::new(
//!     "postgres://{tenant}.db.internal/app",
//!     "postgres://shared.db.internal/app",
//! )
//! .with_user_template("{tenant}_user");
//!
//! let resolver = ConnectionResolver::new(PostgresDriver::new(), config, Arc::new(NoCredentials))?
//!     .with_trace_sink(Arc::new(TracingTraceSink));
//!
//! let identity = Identity::new("alice").with_extra_credential("tenant", "acme");
//! let connection = resolver.open_connection(&identity).await?;
//! # drop(connection);
//! # Ok(())
//! # }
//! ```
//!
//! [`Identity`]: tenantdb_core::Identity

pub mod credentials;
pub mod driver;
pub mod error;
pub mod postgres;
pub mod resolver;
pub mod trace;

pub use credentials::{
    CredentialPropertiesProvider, ExtraCredentials, NoCredentials, StaticCredentials,
    provider_from_config,
};
pub use driver::Driver;
pub use error::{DriverError, ResolverError};
pub use postgres::PostgresDriver;
pub use resolver::{ConnectionResolver, ResolvedConnectionRequest, apply_tenant};
pub use trace::{NoopTraceSink, TraceSink, TracedConnection, TracingTraceSink};
