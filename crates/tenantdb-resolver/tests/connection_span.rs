//! Integration tests for the `db.connect` span emitted by `TracingTraceSink`.

mod common;

use std::sync::Arc;

use common::{FALLBACK, Outcome, RecordingDriver, SpanCapture, TEMPLATE, tenant};
use pretty_assertions::assert_eq;
use tenantdb_core::{Identity, ResolverConfig};
use tenantdb_resolver::{ConnectionResolver, NoCredentials, TracingTraceSink};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;

/// Route spans on this thread to a fresh capture until the guard drops.
fn capture_spans() -> (SpanCapture, DefaultGuard) {
    let capture = SpanCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    (capture, tracing::subscriber::set_default(subscriber))
}

fn traced_resolver(outcome: Outcome, template: &str) -> ConnectionResolver<RecordingDriver> {
    ConnectionResolver::new(
        RecordingDriver::new(outcome),
        ResolverConfig::new(template, FALLBACK),
        Arc::new(NoCredentials),
    )
    .unwrap()
    .with_trace_sink(Arc::new(TracingTraceSink))
}

#[tokio::test]
async fn test_successful_open_records_ok_span() {
    let (capture, _guard) = capture_spans();

    let resolver = traced_resolver(Outcome::Connect, TEMPLATE);
    let connection = resolver.open_connection(&tenant("acme")).await.unwrap();
    assert!(!connection.span().is_disabled());

    let spans = capture.spans_named("db.connect");
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.field("db.connection_string"), Some("jdbc:db://acme.internal/app"));
    assert_eq!(span.field("db.driver"), Some("recording"));
    assert_eq!(span.field("otel.kind"), Some("client"));
    assert_eq!(span.field("otel.status_code"), Some("OK"));
}

#[tokio::test]
async fn test_failed_open_records_error_span() {
    let (capture, _guard) = capture_spans();

    for outcome in [Outcome::Fail, Outcome::NoConnection] {
        let resolver = traced_resolver(outcome, TEMPLATE);
        assert!(resolver.open_connection(&tenant("acme")).await.is_err());
    }

    let spans = capture.spans_named("db.connect");
    assert_eq!(spans.len(), 2);
    for span in &spans {
        assert_eq!(span.field("db.connection_string"), Some("jdbc:db://acme.internal/app"));
        assert_eq!(span.field("db.driver"), Some("recording"));
        assert_eq!(span.field("otel.status_code"), Some("ERROR"));
    }
}

#[tokio::test]
async fn test_span_connection_string_masks_password() {
    let (capture, _guard) = capture_spans();

    let template = "jdbc:db://svc:hunter2@{tenant}.internal/app";
    let resolver = traced_resolver(Outcome::Connect, template);
    let connection = resolver.open_connection(&tenant("acme")).await.unwrap();
    assert_eq!(connection.url, "jdbc:db://svc:hunter2@acme.internal/app");

    let spans = capture.spans_named("db.connect");
    assert_eq!(spans.len(), 1);
    assert_eq!(
        spans[0].field("db.connection_string"),
        Some("jdbc:db://svc:****@acme.internal/app")
    );
    for span in capture.spans() {
        assert!(span.fields.values().all(|value| !value.contains("hunter2")));
    }
}

#[tokio::test]
async fn test_fallback_open_uses_fallback_connection_string() {
    let (capture, _guard) = capture_spans();

    let resolver = traced_resolver(Outcome::Connect, TEMPLATE);
    let _connection = resolver.open_connection(&Identity::new("bob")).await.unwrap();

    let spans = capture.spans_named("db.connect");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].field("db.connection_string"), Some(FALLBACK));
}
