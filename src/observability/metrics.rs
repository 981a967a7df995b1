//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by page, status
//! - `site_request_duration_seconds` (histogram): latency distribution
//! - `site_page_loads_total` (counter): module loads by page, outcome
//! - `site_page_views_total` (counter): rendered pages, analytics only
//! - `site_root_resolutions_total` (counter): page chosen for `/`
//!
//! # Design Decisions
//! - Recording is always safe; without an installed exporter it is a no-op
//! - Labels are low-cardinality (page names, status codes)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::pages::PageId;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(page: &str, status: u16, start: Instant) {
    metrics::counter!(
        "site_requests_total",
        "page" => page.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("site_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_page_load(page: PageId, outcome: &'static str) {
    metrics::counter!(
        "site_page_loads_total",
        "page" => page.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_page_view(page: PageId) {
    metrics::counter!("site_page_views_total", "page" => page.as_str()).increment(1);
}

pub fn record_root_resolution(page: PageId) {
    metrics::counter!("site_root_resolutions_total", "page" => page.as_str()).increment(1);
}
