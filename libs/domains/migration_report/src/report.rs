use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use strum::Display;

/// Report schema version stamped into every report
pub const REPORT_VERSION: &str = "1.0";

/// Currency of every cost figure
pub const CURRENCY: &str = "USD";

/// Kind of catalog resource a report references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    #[serde(rename = "vnet")]
    #[strum(serialize = "vnet")]
    VNet,
    SshKey,
    SecurityGroup,
    Spec,
    Image,
}

/// A resource that could not be retrieved and is therefore absent from the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceWarning {
    pub kind: ResourceKind,
    pub resource_id: String,
    pub cause: String,
}

impl fmt::Display for ResourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resource unavailable: {} '{}': {}",
            self.kind, self.resource_id, self.cause
        )
    }
}

/// The full, immutable output of one synthesis call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub metadata: ReportMetadata,
    pub summary: MigrationSummary,
    pub network_resources: NetworkResources,
    pub security_resources: SecurityResources,
    pub compute_resources: ComputeResources,
    pub cost_estimation: CostEstimation,
    pub warnings: Vec<ResourceWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generated_at: DateTime<Local>,
    pub namespace: String,
    pub infra_id: String,
    pub infra_name: String,
    pub report_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub infra_name: String,
    pub infra_description: String,
    pub status: String,
    pub target_cloud: String,
    pub target_region: String,
    pub total_vm_count: usize,
    pub running_vm_count: usize,
    pub stopped_vm_count: usize,
    pub label: HashMap<String, String>,
    pub install_mon_agent: String,
}

// ============================================================================
// Network
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResources {
    pub vnets: Vec<ReportVNet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVNet {
    pub name: String,
    pub csp_vnet_id: String,
    pub cidr_block: String,
    /// Always empty: the catalog's VNet entity carries no region
    pub region: String,
    pub subnets: Vec<ReportSubnet>,
    pub subnet_count: usize,
    pub connection_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubnet {
    pub name: String,
    pub csp_subnet_id: String,
    pub cidr_block: String,
    pub zone: String,
}

// ============================================================================
// Security
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityResources {
    pub ssh_keys: Vec<ReportSshKey>,
    pub security_groups: Vec<ReportSecurityGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSshKey {
    pub name: String,
    pub csp_ssh_key_id: String,
    pub username: String,
    pub public_key: String,
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSecurityGroup {
    pub name: String,
    pub csp_security_group_id: String,
    pub vnet_name: String,
    pub rules: Vec<ReportFirewallRule>,
    pub rule_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFirewallRule {
    pub direction: String,
    pub protocol: String,
    pub from_port: String,
    pub to_port: String,
    pub cidr: String,
}

// ============================================================================
// Compute
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResources {
    pub specs: Vec<ReportSpec>,
    pub images: Vec<ReportImage>,
    pub vms: Vec<ReportVm>,
}

/// Machine spec annotated with the number of VMs using it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSpec {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub provider: String,
    pub region: String,
    pub vcpus: u32,
    pub memory_gib: f64,
    pub architecture: String,
    pub cost_per_hour: f64,
    pub usage_count: usize,
}

/// Machine image annotated with the number of VMs using it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportImage {
    pub id: String,
    pub name: String,
    pub csp_image_name: String,
    pub distribution: String,
    pub os_version: String,
    pub os_platform: String,
    pub architecture: String,
    pub usage_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVm {
    pub name: String,
    pub csp_vm_id: String,
    pub status: String,
    pub spec: ReportVmSpec,
    pub image: ReportVmImage,
    pub misc: ReportVmMisc,
    pub region: String,
    pub zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVmSpec {
    pub name: String,
    pub vcpus: u32,
    pub memory_gib: f64,
    pub architecture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVmImage {
    pub name: String,
    pub distribution: String,
    pub os_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportVmMisc {
    pub vnet: String,
    pub subnet: String,
    pub public_ip: String,
    pub private_ip: String,
    pub security_groups: Vec<String>,
    pub ssh_key: String,
    pub connection_name: String,
}

// ============================================================================
// Cost
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimation {
    pub currency: String,
    pub total_cost_per_hour: f64,
    pub total_cost_per_day: f64,
    pub total_cost_per_month: f64,
    pub by_region: Vec<CostByRegion>,
    pub by_vm: Vec<CostByVm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostByRegion {
    pub csp: String,
    pub region: String,
    pub vm_count: usize,
    pub cost_per_hour: f64,
    pub cost_per_month: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostByVm {
    pub vm_name: String,
    pub spec_name: String,
    pub cost_per_hour: f64,
    pub cost_per_month: f64,
}
