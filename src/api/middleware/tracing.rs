//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Every request gets an `INFO` span carrying method, URI and version. The
/// response is logged at `INFO` with status and latency in milliseconds;
/// 5xx responses are additionally reported at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/receive version=HTTP/1.1}: finished processing request latency=4 ms status=200
/// INFO request{method=GET uri=/redirect/aB3dE5gH9k version=HTTP/1.1}: finished processing request latency=1 ms status=307
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
