use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all recommender metrics
const PREFIX: &str = "mrd";

lazy_static! {
    // Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "path", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["method", "path"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Recommendation Metrics
    pub static ref RECOMMENDATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_recommendations_total"), "Recommendations served by engine and outcome"),
        &["engine", "outcome"]
    ).expect("Failed to create recommendations_total metric");

    pub static ref RECOMMENDATION_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_recommendation_duration_seconds"),
            "Time spent computing a recommendation in seconds"
        )
        .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["engine"]
    ).expect("Failed to create recommendation_duration_seconds metric");

    // Catalog Metrics
    pub static ref CATALOG_ROWS: GaugeVec = GaugeVec::new(
        Opts::new(format!("{PREFIX}_catalog_rows"), "Rows in each catalog view"),
        &["view"]
    ).expect("Failed to create catalog_rows metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(RECOMMENDATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_ROWS.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Initialize catalog-specific metrics
pub fn init_catalog_metrics(tracks: usize, similarity_rows: usize, neighbor_rows: usize) {
    CATALOG_ROWS.with_label_values(&["full"]).set(tracks as f64);
    CATALOG_ROWS
        .with_label_values(&["similarity"])
        .set(similarity_rows as f64);
    CATALOG_ROWS
        .with_label_values(&["neighbor"])
        .set(neighbor_rows as f64);

    tracing::info!(
        "Catalog metrics initialized: {} tracks, {} similarity rows, {} neighbor rows",
        tracks,
        similarity_rows,
        neighbor_rows
    );
}

/// Record an HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration.as_secs_f64());
}

/// Record one recommendation computed by `engine`
pub fn record_recommendation(engine: &str, outcome: &str, duration: Duration) {
    RECOMMENDATIONS_TOTAL
        .with_label_values(&[engine, outcome])
        .inc();

    RECOMMENDATION_DURATION_SECONDS
        .with_label_values(&[engine])
        .observe(duration.as_secs_f64());
}

pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_else(|_| String::from(""));
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
