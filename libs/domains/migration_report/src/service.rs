use chrono::Local;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::catalog::CatalogClient;
use crate::collector::{self, Collected, FetchPool};
use crate::cost;
use crate::error::{millis, ReportError, ReportResult};
use crate::extractor::ResourceRefs;
use crate::models::InfraInfo;
use crate::report::{MigrationReport, MigrationSummary, REPORT_VERSION, ReportMetadata};

/// Placeholder for summary fields that cannot be derived from an empty infrastructure
const UNKNOWN: &str = "Unknown";

/// Tuning for one report generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum number of catalog reads in flight at once, across all resource kinds
    pub max_concurrency: usize,
    /// Deadline for a single catalog read; a timed-out read is skipped with a warning
    pub fetch_timeout: Duration,
    /// Deadline for the whole generation; elapsing it fails the call
    pub overall_timeout: Option<Duration>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 8,
            fetch_timeout: Duration::from_secs(30),
            overall_timeout: None,
        }
    }
}

/// Migration Report Service - synthesizes reports from catalog data
///
/// Holds no per-report state; concurrent calls for different
/// infrastructures are independent.
#[derive(Clone)]
pub struct MigrationReportService<C: CatalogClient> {
    client: Arc<C>,
    options: ReportOptions,
}

impl<C: CatalogClient> MigrationReportService<C> {
    pub fn new(client: C) -> Self {
        Self::with_options(client, ReportOptions::default())
    }

    pub fn with_options(client: C, options: ReportOptions) -> Self {
        Self {
            client: Arc::new(client),
            options,
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Generate the migration report for one infrastructure.
    ///
    /// Only a failed snapshot read (or an elapsed overall deadline) is fatal.
    /// Resources that cannot be read are left out and listed as warnings.
    pub async fn generate(&self, ns_id: &str, infra_id: &str) -> ReportResult<MigrationReport> {
        if ns_id.trim().is_empty() {
            return Err(ReportError::InvalidInput(
                "namespace ID is required".to_string(),
            ));
        }
        if infra_id.trim().is_empty() {
            return Err(ReportError::InvalidInput(
                "infrastructure ID is required".to_string(),
            ));
        }

        info!(ns_id, infra_id, "Generating migration report");
        let start = Instant::now();

        let result = match self.options.overall_timeout {
            Some(deadline) => tokio::time::timeout(deadline, self.assemble(ns_id, infra_id))
                .await
                .unwrap_or_else(|_| Err(ReportError::Timeout(millis(deadline)))),
            None => self.assemble(ns_id, infra_id).await,
        };

        match &result {
            Ok(report) => {
                observability::ReportMetrics::record_report_generated(
                    report.summary.total_vm_count,
                    report.warnings.len(),
                    report.cost_estimation.total_cost_per_month,
                    start.elapsed().as_secs_f64(),
                );
                info!(
                    ns_id,
                    infra_id,
                    warnings = report.warnings.len(),
                    "Successfully generated migration report"
                );
            }
            Err(e) => {
                let reason = match e {
                    ReportError::InfraUnavailable { .. } => "infra_unavailable",
                    ReportError::Timeout(_) => "timeout",
                    ReportError::InvalidInput(_) => "invalid_input",
                };
                observability::ReportMetrics::record_report_failed(reason);
            }
        }

        result
    }

    async fn assemble(&self, ns_id: &str, infra_id: &str) -> ReportResult<MigrationReport> {
        let client = self.client.as_ref();

        let infra = client.read_infra(ns_id, infra_id).await.map_err(|e| {
            error!(ns_id, infra_id, error = %e, "Failed to retrieve infrastructure");
            ReportError::InfraUnavailable {
                ns_id: ns_id.to_string(),
                infra_id: infra_id.to_string(),
                source: e,
            }
        })?;

        let refs = ResourceRefs::extract(&infra.vms);
        debug!(
            vnets = refs.vnets.len(),
            ssh_keys = refs.ssh_keys.len(),
            security_groups = refs.security_groups.len(),
            specs = refs.specs.len(),
            images = refs.images.len(),
            "Unique resource counts"
        );

        let pool = FetchPool::new(&self.options);
        let (network, security, compute) = futures::join!(
            collector::collect_network(client, ns_id, &refs.vnets, &pool),
            collector::collect_security(
                client,
                ns_id,
                &refs.ssh_keys,
                &refs.security_groups,
                &pool,
            ),
            collector::collect_compute(client, &infra.vms, &refs.specs, &refs.images, &pool),
        );

        let Collected {
            resources: network_resources,
            warnings: mut warnings,
        } = network;
        let Collected {
            resources: security_resources,
            warnings: security_warnings,
        } = security;
        let Collected {
            resources: compute_resources,
            warnings: compute_warnings,
        } = compute;
        warnings.extend(security_warnings);
        warnings.extend(compute_warnings);

        let cost_estimation = cost::estimate(&compute_resources);

        let metadata = ReportMetadata {
            generated_at: Local::now(),
            namespace: ns_id.to_string(),
            infra_id: infra_id.to_string(),
            infra_name: infra.name.clone(),
            report_version: REPORT_VERSION.to_string(),
        };

        Ok(MigrationReport {
            metadata,
            summary: build_summary(&infra),
            network_resources,
            security_resources,
            compute_resources,
            cost_estimation,
            warnings,
        })
    }
}

/// Summary of the infrastructure.
///
/// Target cloud and region come from the first VM only.
pub fn build_summary(infra: &InfraInfo) -> MigrationSummary {
    let (running_vm_count, stopped_vm_count) =
        infra
            .vms
            .iter()
            .fold((0, 0), |(running, stopped), vm| match classify(&vm.status) {
                VmState::Running => (running + 1, stopped),
                VmState::Stopped => (running, stopped + 1),
                VmState::Other => (running, stopped),
            });

    let (target_cloud, target_region) = match infra.vms.first() {
        Some(vm) => {
            let cloud = if vm.connection_config.provider_name.is_empty() {
                crate::normalize::provider_tag(&vm.connection_name)
            } else {
                vm.connection_config.provider_name.to_uppercase()
            };
            (cloud, vm.region.region.clone())
        }
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };

    MigrationSummary {
        infra_name: infra.name.clone(),
        infra_description: infra.description.clone(),
        status: infra.status.clone(),
        target_cloud,
        target_region,
        total_vm_count: infra.vms.len(),
        running_vm_count,
        stopped_vm_count,
        label: infra.label.clone(),
        install_mon_agent: infra.install_mon_agent.clone(),
    }
}

enum VmState {
    Running,
    Stopped,
    Other,
}

fn classify(status: &str) -> VmState {
    if status.eq_ignore_ascii_case("running") {
        VmState::Running
    } else if status.eq_ignore_ascii_case("stopped") || status.eq_ignore_ascii_case("terminated")
    {
        VmState::Stopped
    } else {
        VmState::Other
    }
}
