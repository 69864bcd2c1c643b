//! Observability utilities for migration reporting.
//!
//! This crate provides:
//! - Prometheus metrics recorder installation and rendering
//! - Report-generation metrics (outcomes, duration, per-resource warnings)
//!
//! # Example
//!
//! ```rust,ignore
//! use observability::{init_metrics, ReportMetrics};
//!
//! init_metrics();
//! ReportMetrics::record_resource_warning("security_group");
//! ```
//!
//! Recording without an installed recorder is a no-op, so library code can
//! record unconditionally.

pub mod report;

pub use report::ReportMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

static METRICS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Initialize the Prometheus metrics recorder.
///
/// Call once at application startup; later calls return the same handle.
/// Returns `None` when another global recorder is already installed.
pub fn init_metrics() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE
        .get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            info!("Prometheus metrics recorder initialized");
            register_metric_descriptions();
            Ok::<_, metrics_exporter_prometheus::BuildError>(handle)
        })
        .map_err(|e| warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
}

/// Get the metrics handle (must call init_metrics first)
pub fn get_metrics_handle() -> Option<&'static PrometheusHandle> {
    METRICS_HANDLE.get()
}

/// Render all metrics in the Prometheus text format
pub fn render_metrics() -> String {
    match get_metrics_handle() {
        Some(handle) => handle.render(),
        None => "# Metrics not initialized\n".to_string(),
    }
}

/// Register metric descriptions for documentation
fn register_metric_descriptions() {
    use metrics::describe_counter;
    use metrics::describe_gauge;
    use metrics::describe_histogram;

    describe_counter!(
        "migration_reports_total",
        "Migration report generations by outcome"
    );
    describe_histogram!(
        "migration_report_duration_seconds",
        "Migration report generation duration in seconds"
    );
    describe_counter!(
        "migration_report_resource_warnings_total",
        "Catalog resources that could not be retrieved, by kind"
    );
    describe_gauge!(
        "migration_report_vms",
        "Number of VMs in the most recently generated report"
    );
    describe_gauge!(
        "migration_report_monthly_cost_usd",
        "Estimated monthly cost of the most recently reported infrastructure"
    );
}
