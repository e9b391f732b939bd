//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the strand server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Domain metrics (strings analyzed, natural-language query outcomes)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "strand_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("strand_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "strand_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

/// Strings analyzed and stored since startup.
pub static STRINGS_ANALYZED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "strand_strings_analyzed_total",
        "Strings analyzed and stored since startup",
    )
    .unwrap()
});

/// Natural-language query translations by outcome.
pub static NLQ_TRANSLATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "strand_nlq_translations_total",
            "Natural-language query translations",
        ),
        &["outcome"], // "parsed", "unparsed"
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    registry
        .register(Box::new(STRINGS_ANALYZED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(NLQ_TRANSLATIONS_TOTAL.clone()))
        .unwrap();
}

/// Encode all registered metrics in Prometheus text exposition format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Handler for the /metrics endpoint.
pub async fn metrics_handler() -> String {
    encode_metrics()
}

/// Normalize a path for metric labels (replace record values with
/// placeholders to keep label cardinality bounded).
pub fn normalize_path(path: &str) -> String {
    let hash_regex = regex_lite::Regex::new(r"[0-9a-fA-F]{64}").unwrap();
    let result = hash_regex.replace_all(path, "{hash}");

    // Everything after /strings/ except the NL filter route is a literal
    // string value.
    match result.strip_prefix("/api/v1/strings/") {
        Some(rest) if rest != "filter-by-natural-language" => {
            "/api/v1/strings/{value}".to_string()
        }
        _ => result.to_string(),
    }
}
