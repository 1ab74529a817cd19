//! Tenant-aware connection resolution.
//!
//! For each request the resolver:
//! 1. Reads the tenant token from the identity's extra credentials
//! 2. Picks the URL: template with `{tenant}` substituted, or the fallback URL
//! 3. Layers base properties, credential properties and a template-derived `user`
//! 4. Opens the connection through the driver inside a trace span
//!
//! It holds no per-call state and is safe to share across tasks.

use std::sync::Arc;

use tenantdb_core::{
    ConnectionProperties, Identity, ResolverConfig, TENANT_PLACEHOLDER, USER_PROPERTY,
    redacted_url,
};
use tracing::Instrument;

use crate::credentials::CredentialPropertiesProvider;
use crate::driver::Driver;
use crate::error::ResolverError;
use crate::trace::{NoopTraceSink, TraceSink, TracedConnection};

/// URL and properties computed for one call. Never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConnectionRequest {
    pub url: String,
    pub properties: ConnectionProperties,
}

/// Opens per-tenant connections through a [`Driver`].
pub struct ConnectionResolver<D> {
    driver: D,
    config: ResolverConfig,
    credentials: Arc<dyn CredentialPropertiesProvider>,
    trace_sink: Arc<dyn TraceSink>,
}

impl<D: Driver> ConnectionResolver<D> {
    /// Create a resolver that owns `config`. Fails if a required field is empty.
    pub fn new(
        driver: D,
        config: ResolverConfig,
        credentials: Arc<dyn CredentialPropertiesProvider>,
    ) -> Result<Self, ResolverError> {
        config.validate()?;

        if !config.template_has_placeholder() {
            tracing::warn!(
                template = %redacted_url(&config.connection_url_template),
                "Connection URL template has no {} placeholder; every tenant gets the same URL",
                TENANT_PLACEHOLDER
            );
        }
        if config.user_template.is_some() && !config.user_template_has_placeholder() {
            tracing::warn!(
                "User template has no {} placeholder; every tenant gets the same user",
                TENANT_PLACEHOLDER
            );
        }

        Ok(Self {
            driver,
            config,
            credentials,
            trace_sink: Arc::new(NoopTraceSink),
        })
    }

    /// Record connection opens through `sink` instead of discarding them.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = sink;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Compute the URL and properties for `identity` without connecting.
    pub fn resolve(&self, identity: &Identity) -> ResolvedConnectionRequest {
        let tenant = identity.extra_credential(&self.config.tenant_credential_key);

        let url = match tenant {
            Some(tenant) => apply_tenant(&self.config.connection_url_template, tenant),
            None => self.config.fallback_connection_url.clone(),
        };

        let mut properties = self.config.connection_properties.clone();
        properties.merge(&self.credentials.credential_properties(identity));

        if let (Some(template), Some(tenant)) = (&self.config.user_template, tenant)
            && !properties.contains_key(USER_PROPERTY)
        {
            properties.insert(USER_PROPERTY, apply_tenant(template, tenant));
        }

        tracing::debug!(
            tenant = tenant.is_some(),
            url = %redacted_url(&url),
            properties = ?properties.keys().collect::<Vec<_>>(),
            "Resolved tenant connection"
        );

        ResolvedConnectionRequest { url, properties }
    }

    /// Resolve and open a connection for `identity`.
    ///
    /// The connection belongs to the caller; the resolver keeps no reference to it.
    pub async fn open_connection(
        &self,
        identity: &Identity,
    ) -> Result<TracedConnection<D::Connection>, ResolverError> {
        let ResolvedConnectionRequest { url, properties } = self.resolve(identity);
        let driver = self.driver.name();
        let display_url = redacted_url(&url);

        let span = self.trace_sink.connection_span(&display_url, driver);
        let opened = self
            .driver
            .connect(&url, &properties)
            .instrument(span.clone())
            .await;

        match opened {
            Ok(Some(connection)) => {
                span.record("otel.status_code", "OK");
                Ok(TracedConnection::new(connection, span))
            }
            Ok(None) => {
                span.record("otel.status_code", "ERROR");
                tracing::warn!(
                    url = %display_url,
                    driver = %driver,
                    "Driver returned no connection"
                );
                Err(ResolverError::NullConnection {
                    url,
                    driver: driver.to_string(),
                })
            }
            Err(source) => {
                span.record("otel.status_code", "ERROR");
                tracing::warn!(
                    url = %display_url,
                    driver = %driver,
                    error = %source,
                    "Failed to open connection"
                );
                Err(ResolverError::ConnectionFailed {
                    url,
                    driver: driver.to_string(),
                    source,
                })
            }
        }
    }

    /// No-op: the resolver holds no resources of its own.
    pub fn close(&self) -> Result<(), ResolverError> {
        Ok(())
    }
}

/// Replace every `{tenant}` in `template` with `tenant`, in a single pass.
pub fn apply_tenant(template: &str, tenant: &str) -> String {
    template.replace(TENANT_PLACEHOLDER, tenant)
}
