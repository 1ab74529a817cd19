//! Tracing of connection acquisition.
//!
//! The resolver asks a [`TraceSink`] for a span per open call, runs the
//! driver inside it, and hands the span to the returned
//! [`TracedConnection`] so later work on the connection can be recorded
//! under the same span.
//!
//! Span fields follow the OpenTelemetry database conventions:
//!
//! | Field | Description |
//! |-------|-------------|
//! | `db.connection_string` | The resolved URL, password masked |
//! | `db.driver` | Driver identity |
//! | `otel.kind` | Always `client` |
//! | `otel.status_code` | `OK` or `ERROR` once the open call finishes |

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::Span;

/// Produces the span wrapping one connection open.
///
/// `url` has any userinfo password already masked.
pub trait TraceSink: Send + Sync {
    fn connection_span(&self, url: &str, driver: &str) -> Span;
}

/// Records nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTraceSink;

impl TraceSink for NoopTraceSink {
    fn connection_span(&self, _url: &str, _driver: &str) -> Span {
        Span::none()
    }
}

/// Emits `db.connect` spans through the `tracing` subscriber in scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTraceSink;

impl TraceSink for TracingTraceSink {
    fn connection_span(&self, url: &str, driver: &str) -> Span {
        tracing::info_span!(
            "db.connect",
            db.connection_string = %url,
            db.driver = %driver,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    }
}

/// A driver connection together with the span it was opened in.
pub struct TracedConnection<C> {
    inner: C,
    span: Span,
}

impl<C> TracedConnection<C> {
    pub fn new(inner: C, span: Span) -> Self {
        Self { inner, span }
    }

    /// The span the connection was opened in. Clone it to instrument queries.
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn into_parts(self) -> (C, Span) {
        (self.inner, self.span)
    }
}

impl<C> Deref for TracedConnection<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C> DerefMut for TracedConnection<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: fmt::Debug> fmt::Debug for TracedConnection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedConnection")
            .field("inner", &self.inner)
            .field("span", &self.span)
            .finish()
    }
}
