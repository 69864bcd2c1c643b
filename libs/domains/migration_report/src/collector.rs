//! Resource collectors.
//!
//! Every collector fetches one resource per identifier, normalizes it and
//! keeps going when a fetch fails. Failures come back as warnings next to
//! the collected records; they never abort a collector.

use futures::future::join_all;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::catalog::{CatalogClient, SYSTEM_NAMESPACE};
use crate::error::{millis, CatalogError, CatalogResult};
use crate::extractor::IdSet;
use crate::models::{ImageInfo, SpecInfo, VmInfo};
use crate::normalize;
use crate::report::{
    ComputeResources, NetworkResources, ReportVm, ReportVmMisc, ResourceKind, ResourceWarning,
    SecurityResources,
};
use crate::service::ReportOptions;

/// Records gathered by a collector plus the resources it had to skip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collected<T> {
    pub resources: T,
    pub warnings: Vec<ResourceWarning>,
}

/// Catalog read budget shared by every collector of one report.
///
/// A single semaphore bounds all in-flight reads, whatever their resource
/// kind; the timeout applies to each read once it holds a permit.
#[derive(Debug)]
pub struct FetchPool {
    semaphore: Semaphore,
    timeout: Duration,
}

impl FetchPool {
    pub fn new(options: &ReportOptions) -> Self {
        Self {
            semaphore: Semaphore::new(options.max_concurrency.max(1)),
            timeout: options.fetch_timeout,
        }
    }

    /// Fetch every identifier through the pool.
    ///
    /// Results keep the dispatch order (lexical id order). All fetches run to
    /// completion or failure; one failure never cancels its siblings.
    async fn fetch_each<'a, T, F, Fut>(
        &self,
        ids: Vec<&'a str>,
        fetch: F,
    ) -> Vec<(&'a str, CatalogResult<T>)>
    where
        F: Fn(&'a str) -> Fut,
        Fut: Future<Output = CatalogResult<T>>,
    {
        let fetch = &fetch;
        let fetches = ids.into_iter().map(|id| async move {
            let _permit = self.semaphore.acquire().await;
            let result = match tokio::time::timeout(self.timeout, fetch(id)).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::Timeout(millis(self.timeout))),
            };
            (id, result)
        });

        join_all(fetches).await
    }
}

/// Split fetch results into successes and warnings, logging each failure
fn partition<'a, T>(
    kind: ResourceKind,
    results: Vec<(&'a str, CatalogResult<T>)>,
    warnings: &mut Vec<ResourceWarning>,
) -> Vec<(&'a str, T)> {
    let mut fetched = Vec::with_capacity(results.len());

    for (id, result) in results {
        match result {
            Ok(resource) => fetched.push((id, resource)),
            Err(e) => {
                warn!(
                    resource_kind = %kind,
                    resource_id = id,
                    error = %e,
                    "Failed to retrieve resource, skipping"
                );
                observability::ReportMetrics::record_resource_warning(&kind.to_string());
                warnings.push(ResourceWarning {
                    kind,
                    resource_id: id.to_string(),
                    cause: e.to_string(),
                });
            }
        }
    }

    fetched
}

/// Collect virtual networks (with subnets)
pub async fn collect_network<C>(
    client: &C,
    ns_id: &str,
    vnet_ids: &IdSet,
    pool: &FetchPool,
) -> Collected<NetworkResources>
where
    C: CatalogClient + ?Sized,
{
    let mut warnings = Vec::new();

    let results = pool.fetch_each(vnet_ids.sorted(), |id| client.read_vnet(ns_id, id)).await;
    let vnets = partition(ResourceKind::VNet, results, &mut warnings)
        .into_iter()
        .map(|(_, vnet)| normalize::vnet_record(vnet))
        .collect::<Vec<_>>();

    debug!(
        requested = vnet_ids.len(),
        collected = vnets.len(),
        "Collected network resources"
    );

    Collected {
        resources: NetworkResources { vnets },
        warnings,
    }
}

/// Collect SSH credentials and security groups (with firewall rules)
pub async fn collect_security<C>(
    client: &C,
    ns_id: &str,
    ssh_key_ids: &IdSet,
    security_group_ids: &IdSet,
    pool: &FetchPool,
) -> Collected<SecurityResources>
where
    C: CatalogClient + ?Sized,
{
    let mut warnings = Vec::new();

    let (key_results, sg_results) = futures::join!(
        pool.fetch_each(ssh_key_ids.sorted(), |id| client
            .read_ssh_key(ns_id, id)),
        pool.fetch_each(security_group_ids.sorted(), |id| client
            .read_security_group(ns_id, id)),
    );

    let ssh_keys = partition(ResourceKind::SshKey, key_results, &mut warnings)
        .into_iter()
        .map(|(_, key)| normalize::ssh_key_record(key))
        .collect::<Vec<_>>();

    let security_groups = partition(ResourceKind::SecurityGroup, sg_results, &mut warnings)
        .into_iter()
        .map(|(_, sg)| normalize::security_group_record(sg))
        .collect::<Vec<_>>();

    debug!(
        ssh_keys = ssh_keys.len(),
        security_groups = security_groups.len(),
        "Collected security resources"
    );

    Collected {
        resources: SecurityResources {
            ssh_keys,
            security_groups,
        },
        warnings,
    }
}

/// Collect specs and images (annotated with usage counts) and project every VM.
///
/// Specs and images are read from the system namespace.
pub async fn collect_compute<C>(
    client: &C,
    vms: &[VmInfo],
    spec_ids: &IdSet,
    image_ids: &IdSet,
    pool: &FetchPool,
) -> Collected<ComputeResources>
where
    C: CatalogClient + ?Sized,
{
    let mut warnings = Vec::new();

    let (spec_results, image_results) = futures::join!(
        pool.fetch_each(spec_ids.sorted(), |id| client
            .read_spec(SYSTEM_NAMESPACE, id)),
        pool.fetch_each(image_ids.sorted(), |id| client
            .read_image(SYSTEM_NAMESPACE, id)),
    );

    let specs = partition(ResourceKind::Spec, spec_results, &mut warnings);
    let images = partition(ResourceKind::Image, image_results, &mut warnings);

    let spec_usage = usage_counts(vms.iter().map(|vm| vm.spec_id.as_str()));
    let image_usage = usage_counts(vms.iter().map(|vm| vm.image_id.as_str()));

    let spec_records = specs
        .iter()
        .map(|(id, spec)| normalize::spec_record(spec, usage_of(&spec_usage, id)))
        .collect();
    let image_records = images
        .iter()
        .map(|(id, image)| normalize::image_record(image, usage_of(&image_usage, id)))
        .collect();

    let spec_by_id: HashMap<&str, &SpecInfo> = specs.iter().map(|(id, s)| (*id, s)).collect();
    let image_by_id: HashMap<&str, &ImageInfo> = images.iter().map(|(id, i)| (*id, i)).collect();

    let vm_records = vms
        .iter()
        .map(|vm| {
            vm_record(
                vm,
                spec_by_id.get(vm.spec_id.as_str()).copied(),
                image_by_id.get(vm.image_id.as_str()).copied(),
            )
        })
        .collect();

    Collected {
        resources: ComputeResources {
            specs: spec_records,
            images: image_records,
            vms: vm_records,
        },
        warnings,
    }
}

/// Number of references per identifier (a multiplicity, not a set size)
fn usage_counts<'a>(refs: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    refs.fold(HashMap::new(), |mut counts, id| {
        *counts.entry(id).or_insert(0) += 1;
        counts
    })
}

fn usage_of(counts: &HashMap<&str, usize>, id: &str) -> usize {
    counts.get(id).copied().unwrap_or_default()
}

fn vm_record(vm: &VmInfo, spec: Option<&SpecInfo>, image: Option<&ImageInfo>) -> ReportVm {
    ReportVm {
        name: vm.name.clone(),
        csp_vm_id: vm.csp_resource_id.clone(),
        status: vm.status.clone(),
        spec: normalize::vm_spec(&vm.csp_spec_name, spec),
        image: normalize::vm_image(image),
        misc: ReportVmMisc {
            vnet: vm.vnet_id.clone(),
            subnet: vm.subnet_id.clone(),
            public_ip: vm.public_ip.clone(),
            private_ip: vm.private_ip.clone(),
            security_groups: vm.security_group_ids.clone(),
            ssh_key: vm.ssh_key_id.clone(),
            connection_name: vm.connection_name.clone(),
        },
        region: vm.region.region.clone(),
        zone: vm.region.zone.clone(),
    }
}
