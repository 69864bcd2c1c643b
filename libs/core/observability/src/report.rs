//! Metrics for migration report generation.

use metrics::{counter, gauge, histogram};

/// Report metrics recorder
pub struct ReportMetrics;

impl ReportMetrics {
    /// Record a report that was assembled (possibly with missing resources)
    pub fn record_report_generated(
        vm_count: usize,
        warning_count: usize,
        monthly_cost: f64,
        duration_secs: f64,
    ) {
        counter!("migration_reports_total", "status" => "success").increment(1);
        histogram!("migration_report_duration_seconds").record(duration_secs);
        gauge!("migration_report_vms").set(vm_count as f64);
        gauge!("migration_report_monthly_cost_usd").set(monthly_cost);

        tracing::debug!(
            vm_count = vm_count,
            warning_count = warning_count,
            duration_secs = duration_secs,
            "Report metrics recorded"
        );
    }

    /// Record a generation that failed fatally
    pub fn record_report_failed(reason: &str) {
        counter!(
            "migration_reports_total",
            "status" => "failed",
            "reason" => reason.to_string()
        )
        .increment(1);
    }

    /// Record one catalog resource that was skipped
    pub fn record_resource_warning(resource_kind: &str) {
        counter!(
            "migration_report_resource_warnings_total",
            "resource_kind" => resource_kind.to_string()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_does_not_panic() {
        ReportMetrics::record_report_generated(3, 1, 124.5, 0.25);
        ReportMetrics::record_report_failed("infra_unavailable");
        ReportMetrics::record_resource_warning("spec");
    }
}
