/*!
 * Structured Tracing
 * Per-operation and per-request spans using the tracing crate
 *
 * Features:
 * - Trace ID generation for request correlation
 * - JSON-formatted logs for structured parsing
 * - Slow operation warnings with duration fields
 */

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Engine operations slower than this are logged at warn
const SLOW_OPERATION_MS: u128 = 100;

/// RPC requests slower than this are logged at warn
const SLOW_REQUEST_MS: u128 = 250;

/// Initialize structured tracing
///
/// `RUST_LOG` sets the filter (default: info). A subscriber that is already
/// installed is left in place, so tests may call this repeatedly.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .compact(),
            )
            .try_init()
    };

    if installed.is_ok() {
        info!(json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for request correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for one engine operation with structured fields
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    operation: &'static str,
    trace_id: String,
}

impl OperationSpan {
    pub fn new(operation: &'static str, path: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "fs_operation",
            trace_id = %trace_id,
            operation = operation,
            path = path,
            destination = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
            items = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            operation,
            trace_id,
        }
    }

    /// Get the trace ID for this operation
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record the second path of a two-path operation
    pub fn record_destination(&self, destination: &str) {
        self.span.record("destination", destination);
    }

    /// Record the number of entries produced
    pub fn record_items(&self, count: usize) {
        self.span.record("items", count);
    }

    /// Record the outcome of a typed result
    pub fn record_outcome<T, E: std::fmt::Display>(&self, result: &Result<T, E>) {
        match result {
            Ok(_) => {
                self.span.record("result", "success");
            }
            Err(e) => {
                self.span.record("result", "error");
                self.span.record("error", tracing::field::display(e));
            }
        }
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > SLOW_OPERATION_MS {
            self.span.record("duration_ms", duration.as_millis());
            warn!(
                trace_id = %self.trace_id,
                operation = self.operation,
                duration_ms = duration.as_millis(),
                slow = true,
                "slow file operation"
            );
        } else {
            self.span.record("duration_us", duration.as_micros());
            debug!(
                trace_id = %self.trace_id,
                operation = self.operation,
                duration_us = duration.as_micros(),
                "file operation completed"
            );
        }
    }
}

/// Span for one JSON-RPC request
pub struct RequestSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl RequestSpan {
    pub fn new(method: &str, request_id: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "rpc_request",
            trace_id = %trace_id,
            method = method,
            request_id = request_id,
            status = tracing::field::Empty,
            error_code = tracing::field::Empty,
            duration_us = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let entered = span.enter();
        debug!(method, request_id, "rpc request started");
        drop(entered);

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn record_success(&self) {
        self.span.record("status", "ok");
    }

    pub fn record_error(&self, code: i64) {
        self.span.record("status", "error");
        self.span.record("error_code", code);
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }

    /// Underlying span, for instrumenting futures that outlive an `enter`
    pub fn span(&self) -> &tracing::Span {
        &self.span
    }
}

impl Drop for RequestSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();

        if duration.as_millis() > SLOW_REQUEST_MS {
            self.span.record("duration_ms", duration.as_millis());
            warn!(
                trace_id = %self.trace_id,
                duration_ms = duration.as_millis(),
                slow = true,
                "slow rpc request"
            );
        } else {
            self.span.record("duration_us", duration.as_micros());
            debug!(
                trace_id = %self.trace_id,
                duration_us = duration.as_micros(),
                "rpc request completed"
            );
        }
    }
}

/// Helper to create an operation span
#[inline]
pub fn span_operation(operation: &'static str, path: &str) -> OperationSpan {
    OperationSpan::new(operation, path)
}

/// Helper to create a request span
#[inline]
pub fn span_request(method: &str, request_id: &str) -> RequestSpan {
    RequestSpan::new(method, request_id)
}
