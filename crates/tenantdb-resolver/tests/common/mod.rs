//! Shared fixtures for the resolver integration tests.
//!
//! This module provides:
//! - A recording driver that stands in for a real database
//! - Fixed credential providers and identity helpers
//! - A tracing layer that captures span fields for assertions

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tenantdb_core::{ConnectionProperties, Identity};
use tenantdb_resolver::{CredentialPropertiesProvider, Driver, DriverError};
use tracing::field::{Field, Visit};
use tracing::span;
use tracing_subscriber::layer::Context;

pub const TEMPLATE: &str = "jdbc:db://{tenant}.internal/app";
pub const FALLBACK: &str = "jdbc:db://shared.internal/app";

// =============================================================================
// DRIVER
// =============================================================================

/// What the recording driver does on `connect`.
#[derive(Clone, Copy)]
pub enum Outcome {
    Connect,
    NoConnection,
    Fail,
}

/// A connection handle that remembers what it was opened with.
#[derive(Debug)]
pub struct FakeConnection {
    pub url: String,
    pub properties: ConnectionProperties,
}

pub struct RecordingDriver {
    outcome: Outcome,
    calls: Mutex<Vec<String>>,
}

impl RecordingDriver {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Driver for RecordingDriver {
    type Connection = FakeConnection;

    fn name(&self) -> &str {
        "recording"
    }

    async fn connect(
        &self,
        url: &str,
        properties: &ConnectionProperties,
    ) -> Result<Option<FakeConnection>, DriverError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.outcome {
            Outcome::Connect => Ok(Some(FakeConnection {
                url: url.to_string(),
                properties: properties.clone(),
            })),
            Outcome::NoConnection => Ok(None),
            Outcome::Fail => Err(DriverError::InvalidUrl("malformed url".to_string())),
        }
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Returns fixed properties regardless of identity.
pub struct FixedCredentials(pub ConnectionProperties);

impl CredentialPropertiesProvider for FixedCredentials {
    fn credential_properties(&self, _identity: &Identity) -> ConnectionProperties {
        self.0.clone()
    }
}

pub fn props(pairs: &[(&str, &str)]) -> ConnectionProperties {
    pairs.iter().copied().collect()
}

pub fn tenant(value: &str) -> Identity {
    Identity::new("alice").with_extra_credential("tenant", value)
}

// =============================================================================
// SPAN CAPTURE
// =============================================================================

/// Name and fields of one span, as seen by the subscriber.
#[derive(Debug, Clone, Default)]
pub struct CapturedSpan {
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

impl CapturedSpan {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct Captured {
    spans: Vec<CapturedSpan>,
    // span ids are reused once a span closes, so map to the latest entry
    by_id: HashMap<u64, usize>,
}

/// Layer recording every span's fields, including ones filled in later.
#[derive(Clone, Default)]
pub struct SpanCapture {
    captured: Arc<Mutex<Captured>>,
}

impl SpanCapture {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.captured.lock().unwrap().spans.clone()
    }

    pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans().into_iter().filter(|s| s.name == name).collect()
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for SpanCapture {
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &span::Id, _ctx: Context<'_, S>) {
        let mut span = CapturedSpan {
            name: attrs.metadata().name().to_string(),
            fields: BTreeMap::new(),
        };
        attrs.record(&mut FieldVisitor(&mut span.fields));

        let mut captured = self.captured.lock().unwrap();
        let index = captured.spans.len();
        captured.spans.push(span);
        captured.by_id.insert(id.into_u64(), index);
    }

    fn on_record(&self, id: &span::Id, values: &span::Record<'_>, _ctx: Context<'_, S>) {
        let mut captured = self.captured.lock().unwrap();
        let Some(&index) = captured.by_id.get(&id.into_u64()) else {
            return;
        };
        values.record(&mut FieldVisitor(&mut captured.spans[index].fields));
    }
}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}
