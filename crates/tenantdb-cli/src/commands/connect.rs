//! `tenantdb connect` command implementation.

use anyhow::{Context, Result};
use sqlx::Connection;
use tenantdb_core::TenantDbConfig;
use tenantdb_resolver::PostgresDriver;
use tracing::Instrument;

use super::{IdentityArgs, build_resolver};

/// Open a connection for the identity, check it with `SELECT 1`, then close it.
pub async fn run(config: &TenantDbConfig, args: &IdentityArgs) -> Result<()> {
    let resolver = build_resolver(config, PostgresDriver::new())?;
    let identity = args.identity();

    let connection = resolver.open_connection(&identity).await?;
    let (mut connection, span) = connection.into_parts();

    let one: i32 = sqlx::query_scalar("SELECT 1")
        .fetch_one(&mut connection)
        .instrument(span.clone())
        .await
        .context("SELECT 1 failed")?;

    connection
        .close()
        .instrument(span)
        .await
        .context("failed to close connection")?;

    tracing::info!(user = %identity.user(), "Connection check succeeded");
    println!("ok (SELECT 1 returned {one})");
    resolver.close()?;
    Ok(())
}
