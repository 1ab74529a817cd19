//! `tenantdb resolve` command implementation.
//!
//! Shows where an identity would be routed without opening a connection.

use anyhow::Result;
use serde_json::json;
use tenantdb_core::{TenantDbConfig, redacted_url};
use tenantdb_resolver::PostgresDriver;

use super::{IdentityArgs, build_resolver};

pub fn run(config: &TenantDbConfig, args: &IdentityArgs, as_json: bool) -> Result<()> {
    let resolver = build_resolver(config, PostgresDriver::new())?;
    let identity = args.identity();
    let request = resolver.resolve(&identity);
    let tenant = identity.extra_credential(&config.resolver.tenant_credential_key);
    let url = redacted_url(&request.url);
    let properties = request.properties.redacted();

    if as_json {
        let out = json!({
            "tenant": tenant,
            "url": url,
            "properties": properties,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    match tenant {
        Some(tenant) => println!("tenant:     {tenant}"),
        None => println!("tenant:     (none, using fallback URL)"),
    }
    println!("url:        {url}");
    if properties.is_empty() {
        println!("properties: (none)");
    } else {
        println!("properties:");
        for (key, value) in &properties {
            println!("  {key} = {value}");
        }
    }
    Ok(())
}
