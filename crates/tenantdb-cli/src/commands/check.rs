//! `tenantdb check` command implementation.
//!
//! Loading already rejects missing required fields; this command additionally
//! reports settings that load fine but cannot have any effect.

use std::path::Path;

use anyhow::{Result, bail};
use tenantdb_core::{CredentialsConfig, TENANT_PLACEHOLDER, TenantDbConfig};

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Config path of the offending value, e.g. `resolver.user_template`.
    pub location: &'static str,
    pub message: String,
}

impl CheckFinding {
    fn warning(location: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }

    fn error(location: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }
}

/// Inspect a loaded configuration.
pub fn check_config(config: &TenantDbConfig) -> Vec<CheckFinding> {
    let mut findings = Vec::new();
    let resolver = &config.resolver;

    if !resolver.template_has_placeholder() {
        findings.push(CheckFinding::warning(
            "resolver.connection_url_template",
            format!("no {TENANT_PLACEHOLDER} placeholder; all tenants share one URL"),
        ));
    }
    if resolver.user_template.is_some() && !resolver.user_template_has_placeholder() {
        findings.push(CheckFinding::warning(
            "resolver.user_template",
            format!("no {TENANT_PLACEHOLDER} placeholder; all tenants share one user"),
        ));
    }
    if resolver.user_template.is_some() && resolver.connection_properties.contains_key("user") {
        findings.push(CheckFinding::warning(
            "resolver.user_template",
            "never applied because resolver.connection_properties sets `user`",
        ));
    }
    if let CredentialsConfig::Static { user: Some(_), .. } = config.credentials
        && resolver.user_template.is_some()
    {
        findings.push(CheckFinding::warning(
            "resolver.user_template",
            "never applied because the static credential provider always sets `user`",
        ));
    }
    let (password_env, credential_names) = match &config.credentials {
        CredentialsConfig::None => (None, Vec::new()),
        CredentialsConfig::Static { password_env, .. } => (password_env.as_deref(), Vec::new()),
        CredentialsConfig::ExtraCredential {
            user_credential_name,
            password_credential_name,
            password_env,
            ..
        } => (
            password_env.as_deref(),
            [user_credential_name, password_credential_name]
                .into_iter()
                .flatten()
                .collect(),
        ),
    };
    if let Some(var) = password_env
        && std::env::var(var).is_err()
    {
        findings.push(CheckFinding::warning(
            "credentials.password_env",
            format!("environment variable {var} is not set"),
        ));
    }
    for name in credential_names {
        if name == &resolver.tenant_credential_key {
            findings.push(CheckFinding::error(
                "credentials",
                format!("extra credential '{name}' is also the tenant credential key"),
            ));
        }
    }

    findings
}

pub fn run(path: &Path, config: &TenantDbConfig) -> Result<()> {
    let findings = check_config(config);

    for finding in &findings {
        println!("[{}] {}: {}", finding.severity, finding.location, finding.message);
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("{} has {errors} error(s)", path.display());
    }

    println!(
        "{} is valid ({} warning(s))",
        path.display(),
        findings.len()
    );
    Ok(())
}
