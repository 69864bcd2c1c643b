//! Catalog entities as returned by the inventory service.
//!
//! These are read-only views. Every field that the inventory service may
//! leave out defaults to an empty value so that partially-populated
//! entities still decode.

use serde::Deserialize;
use std::collections::HashMap;

/// Provisioned multi-cloud infrastructure (the snapshot a report is built from)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfraInfo {
    pub id: String,
    pub name: String,
    pub status: String,
    pub description: String,
    pub label: HashMap<String, String>,
    pub install_mon_agent: String,
    #[serde(rename = "vm")]
    pub vms: Vec<VmInfo>,
}

/// Region and zone a VM was placed in
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionZone {
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "Zone")]
    pub zone: String,
}

/// Connection profile a VM was provisioned through
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionConfig {
    pub config_name: String,
    pub provider_name: String,
}

/// Compute node descriptor
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VmInfo {
    pub id: String,
    pub name: String,
    pub csp_resource_id: String,
    pub status: String,
    pub region: RegionZone,
    pub connection_name: String,
    pub connection_config: ConnectionConfig,
    pub spec_id: String,
    pub csp_spec_name: String,
    pub image_id: String,
    #[serde(rename = "vNetId")]
    pub vnet_id: String,
    pub subnet_id: String,
    pub security_group_ids: Vec<String>,
    pub ssh_key_id: String,
    #[serde(rename = "publicIP")]
    pub public_ip: String,
    #[serde(rename = "privateIP")]
    pub private_ip: String,
}

/// Virtual network with its nested subnets
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VNetInfo {
    pub id: String,
    pub name: String,
    pub connection_name: String,
    pub cidr_block: String,
    pub csp_resource_id: String,
    pub subnet_info_list: Vec<SubnetInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubnetInfo {
    pub id: String,
    pub name: String,
    pub csp_resource_id: String,
    #[serde(rename = "ipv4_CIDR")]
    pub ipv4_cidr: String,
    pub zone: String,
}

/// SSH credential
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SshKeyInfo {
    pub id: String,
    pub name: String,
    pub csp_resource_id: String,
    pub username: String,
    pub public_key: String,
    pub fingerprint: String,
}

/// Security group with its nested firewall rules
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityGroupInfo {
    pub id: String,
    pub name: String,
    pub csp_resource_id: String,
    #[serde(rename = "vNetId")]
    pub vnet_id: String,
    pub firewall_rules: Vec<FirewallRuleInfo>,
}

/// Firewall rule. The catalog models a single port value per rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FirewallRuleInfo {
    #[serde(rename = "Direction")]
    pub direction: String,
    #[serde(rename = "Protocol")]
    pub protocol: String,
    #[serde(rename = "Port")]
    pub port: String,
    #[serde(rename = "CIDR")]
    pub cidr: String,
}

/// Machine spec, stored in the system namespace
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecInfo {
    pub id: String,
    pub name: String,
    pub connection_name: String,
    pub provider_name: String,
    pub region_name: String,
    pub csp_spec_name: String,
    #[serde(rename = "vCPU")]
    pub vcpu: u32,
    #[serde(rename = "memoryGiB")]
    pub memory_gib: f64,
    pub cost_per_hour: f64,
    pub architecture: String,
}

/// Machine image, stored in the system namespace
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageInfo {
    pub id: String,
    pub name: String,
    pub csp_image_name: String,
    pub os_type: String,
    pub os_platform: String,
    pub os_distribution: String,
    pub os_architecture: String,
}
