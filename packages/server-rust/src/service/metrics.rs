//! Per-operation instrumentation for the client service.
//!
//! Wraps each service call in a `tracing` span carrying duration and outcome,
//! and reports the same data through the `metrics` facade. Without an
//! installed recorder the metric calls are no-ops.

use std::future::Future;
use std::time::Instant;

use tracing::{info_span, Instrument};

use super::error::ServiceError;

/// Counter of completed operations, labelled by `op` and `outcome`.
pub const OPERATIONS_TOTAL: &str = "clientrisk_operations_total";
/// Histogram of operation latency in seconds, labelled by `op`.
pub const OPERATION_DURATION_SECONDS: &str = "clientrisk_operation_duration_seconds";

/// Runs `fut` inside a `client_op` span and records its duration and outcome.
pub(crate) async fn instrumented<T, F>(op: &'static str, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    let span = info_span!(
        "client_op",
        op = op,
        duration_ms = tracing::field::Empty,
        outcome = tracing::field::Empty,
    );

    async move {
        let start = Instant::now();
        let result = fut.await;
        let elapsed = start.elapsed();

        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };

        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = elapsed.as_millis() as u64;
        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::Span::current().record("outcome", outcome);

        metrics::counter!(OPERATIONS_TOTAL, "op" => op, "outcome" => outcome).increment(1);
        metrics::histogram!(OPERATION_DURATION_SECONDS, "op" => op).record(elapsed.as_secs_f64());

        match &result {
            Err(ServiceError::Storage(e)) => {
                tracing::error!(op, duration_ms, error = %e, "client operation failed");
            }
            _ => tracing::debug!(op, duration_ms, outcome, "client operation complete"),
        }

        result
    }
    .instrument(span)
    .await
}
