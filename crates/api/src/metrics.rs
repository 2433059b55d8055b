// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::Response,
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};

/// Total number of API requests received, labeled by route group.
pub static REQUESTS_BY_ROUTE: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "game_api_requests_total",
        "Total number of API requests, labeled by route group",
        &["route"]
    )
    .expect("Failed to create game_api_requests_total counter vec")
});

/// Histogram for upstream service request durations in seconds.
pub static UPSTREAM_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "game_api_upstream_request_duration",
        "Upstream service request durations in seconds",
        &["service", "operation", "result"],
        vec![0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    )
    .expect("Failed to create upstream request duration histogram")
});

/// Authentication outcome counters.
pub static AUTH_OUTCOMES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "game_api_auth_outcomes_total",
        "Total number of authentication attempts by outcome",
        &["operation", "outcome"]
    )
    .expect("Failed to create auth outcomes counter vec")
});

/// Increment the requests counter for a route group
pub fn inc_requests(route: &str) {
    REQUESTS_BY_ROUTE.with_label_values(&[route]).inc();
}

/// Observe the duration of an upstream service call
///
/// # Arguments
/// * `service` - The upstream service name (`chain` or `ai`)
/// * `operation` - The operation invoked on the upstream
/// * `result` - `success` or `error`
/// * `duration_secs` - The duration of the request in seconds
pub fn observe_upstream_duration(service: &str, operation: &str, result: &str, duration_secs: f64) {
    UPSTREAM_REQUEST_DURATION
        .with_label_values(&[service, operation, result])
        .observe(duration_secs);
}

/// Record the outcome of an authentication attempt
///
/// # Arguments
/// * `operation` - `register`, `login`, or `verify`
/// * `outcome` - `success` or `failure`
pub fn record_auth_outcome(operation: &str, outcome: &str) {
    AUTH_OUTCOMES.with_label_values(&[operation, outcome]).inc();
}

/// Axum handler that exports metrics in Prometheus text format
///
/// # Panics
///
/// This function will panic if:
/// - The metrics encoder fails to encode the metrics data
/// - The UTF-8 conversion of the encoded buffer fails
/// - The HTTP response builder fails to create the response
pub async fn metrics_handler() -> Response<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(String::from_utf8(buffer).expect("metrics buffer should be valid UTF-8"))
        .expect("Failed to create metrics response")
}
