//! CLI command implementations for tenantdb.

pub mod check;
pub mod connect;
pub mod resolve;

use std::sync::Arc;

use clap::Args;
use tenantdb_core::{Identity, TenantDbConfig};
use tenantdb_resolver::{
    ConnectionResolver, Driver, ResolverError, TracingTraceSink, provider_from_config,
};

/// Identity to resolve for, as the session layer would supply it.
#[derive(Args, Debug, Clone)]
pub struct IdentityArgs {
    /// Principal name
    #[arg(long, default_value = "tenantdb")]
    pub user: String,

    /// Extra credential as KEY=VALUE (repeatable), e.g. --credential tenant=acme
    #[arg(long = "credential", value_parser = parse_key_val)]
    pub credentials: Vec<(String, String)>,
}

impl IdentityArgs {
    pub fn identity(&self) -> Identity {
        self.credentials
            .iter()
            .fold(Identity::new(&self.user), |identity, (k, v)| {
                identity.with_extra_credential(k, v)
            })
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build a resolver for `driver` from the loaded configuration.
pub fn build_resolver<D: Driver>(
    config: &TenantDbConfig,
    driver: D,
) -> Result<ConnectionResolver<D>, ResolverError> {
    let resolver = ConnectionResolver::new(
        driver,
        config.resolver.clone(),
        provider_from_config(&config.credentials),
    )?;

    Ok(if config.observability.tracing {
        resolver.with_trace_sink(Arc::new(TracingTraceSink))
    } else {
        resolver
    })
}
