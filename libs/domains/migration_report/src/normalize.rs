//! Field-level normalization from catalog entities to report records.
//!
//! The `vm_*` helpers take an `Option` because a VM may reference a spec or
//! image whose fetch failed; absence degrades to zero or empty values.

use crate::models::{
    FirewallRuleInfo, ImageInfo, SecurityGroupInfo, SpecInfo, SshKeyInfo, SubnetInfo, VNetInfo,
};
use crate::report::{
    ReportFirewallRule, ReportImage, ReportSecurityGroup, ReportSpec, ReportSshKey, ReportSubnet,
    ReportVNet, ReportVmImage, ReportVmSpec,
};

/// Number of public key characters kept in a report
pub const PUBLIC_KEY_VISIBLE_CHARS: usize = 50;

/// Appended to a public key that was cut short
pub const TRUNCATION_MARKER: &str = "...";

/// Delimiter between provider, region and SKU in a fully-qualified spec name
const SPEC_NAME_DELIMITER: char = '+';

/// Keep the first 50 characters of a public key and mark the cut
pub fn truncate_public_key(key: &str) -> String {
    match key.char_indices().nth(PUBLIC_KEY_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}{}", &key[..cut], TRUNCATION_MARKER),
        None => key.to_string(),
    }
}

/// "aws+ap-northeast-2+t3a.xlarge" -> "t3a.xlarge"
pub fn short_spec_name(full_name: &str) -> &str {
    full_name
        .rsplit(SPEC_NAME_DELIMITER)
        .next()
        .unwrap_or(full_name)
}

/// Provider tag of a connection profile name: "aws-ap-northeast-2" -> "AWS"
pub fn provider_tag(connection_name: &str) -> String {
    connection_name
        .split('-')
        .next()
        .unwrap_or_default()
        .to_uppercase()
}

/// Distribution, falling back to OS type and then to platform
pub fn image_distribution(image: &ImageInfo) -> &str {
    first_non_empty(&[
        &image.os_distribution,
        &image.os_type,
        &image.os_platform,
    ])
}

/// OS version, falling back to OS type (never to platform)
pub fn image_os_version(image: &ImageInfo) -> &str {
    first_non_empty(&[&image.os_distribution, &image.os_type])
}

fn first_non_empty<'a>(candidates: &[&'a String]) -> &'a str {
    candidates
        .iter()
        .find(|value| !value.is_empty())
        .map(|value| value.as_str())
        .unwrap_or_default()
}

pub fn vnet_record(vnet: VNetInfo) -> ReportVNet {
    let subnets: Vec<ReportSubnet> = vnet.subnet_info_list.into_iter().map(subnet_record).collect();

    ReportVNet {
        name: vnet.name,
        csp_vnet_id: vnet.csp_resource_id,
        cidr_block: vnet.cidr_block,
        region: String::new(),
        subnet_count: subnets.len(),
        subnets,
        connection_name: vnet.connection_name,
    }
}

fn subnet_record(subnet: SubnetInfo) -> ReportSubnet {
    ReportSubnet {
        name: subnet.name,
        csp_subnet_id: subnet.csp_resource_id,
        cidr_block: subnet.ipv4_cidr,
        zone: subnet.zone,
    }
}

pub fn ssh_key_record(key: SshKeyInfo) -> ReportSshKey {
    ReportSshKey {
        public_key: truncate_public_key(&key.public_key),
        name: key.name,
        csp_ssh_key_id: key.csp_resource_id,
        username: key.username,
        fingerprint: key.fingerprint,
    }
}

pub fn security_group_record(sg: SecurityGroupInfo) -> ReportSecurityGroup {
    let rules: Vec<ReportFirewallRule> = sg.firewall_rules.into_iter().map(firewall_rule).collect();

    ReportSecurityGroup {
        name: sg.name,
        csp_security_group_id: sg.csp_resource_id,
        vnet_name: sg.vnet_id,
        rule_count: rules.len(),
        rules,
    }
}

fn firewall_rule(rule: FirewallRuleInfo) -> ReportFirewallRule {
    ReportFirewallRule {
        direction: rule.direction,
        protocol: rule.protocol,
        from_port: rule.port.clone(),
        to_port: rule.port,
        cidr: rule.cidr,
    }
}

pub fn spec_record(spec: &SpecInfo, usage_count: usize) -> ReportSpec {
    ReportSpec {
        id: spec.id.clone(),
        name: spec.name.clone(),
        short_name: short_spec_name(&spec.csp_spec_name).to_string(),
        provider: spec.provider_name.clone(),
        region: spec.region_name.clone(),
        vcpus: spec.vcpu,
        memory_gib: spec.memory_gib,
        architecture: spec.architecture.clone(),
        cost_per_hour: spec.cost_per_hour,
        usage_count,
    }
}

pub fn image_record(image: &ImageInfo, usage_count: usize) -> ReportImage {
    ReportImage {
        id: image.id.clone(),
        name: image.name.clone(),
        csp_image_name: image.csp_image_name.clone(),
        distribution: image_distribution(image).to_string(),
        os_version: image_os_version(image).to_string(),
        os_platform: image.os_platform.clone(),
        architecture: image.os_architecture.clone(),
        usage_count,
    }
}

/// Spec projection for one VM; the name comes from the VM's own spec name
pub fn vm_spec(csp_spec_name: &str, spec: Option<&SpecInfo>) -> ReportVmSpec {
    ReportVmSpec {
        name: short_spec_name(csp_spec_name).to_string(),
        vcpus: spec.map(|s| s.vcpu).unwrap_or_default(),
        memory_gib: spec.map(|s| s.memory_gib).unwrap_or_default(),
        architecture: spec.map(|s| s.architecture.clone()).unwrap_or_default(),
    }
}

pub fn vm_image(image: Option<&ImageInfo>) -> ReportVmImage {
    match image {
        Some(image) => ReportVmImage {
            name: image.name.clone(),
            distribution: image_distribution(image).to_string(),
            os_version: image_os_version(image).to_string(),
        },
        None => ReportVmImage::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_public_key() {
        let key = "a".repeat(80);
        let truncated = truncate_public_key(&key);

        assert_eq!(truncated, format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_short_public_key_unchanged() {
        let key = "ssh-ed25519 AAAAC3NzaC1lZDI1NT";
        assert_eq!(key.len(), 30);
        assert_eq!(truncate_public_key(key), key);
    }

    #[test]
    fn test_public_key_of_exactly_fifty_chars_unchanged() {
        let key = "k".repeat(50);
        assert_eq!(truncate_public_key(&key), key);
    }

    #[test]
    fn test_short_spec_name() {
        assert_eq!(short_spec_name("aws+ap-northeast-2+t3a.xlarge"), "t3a.xlarge");
        assert_eq!(short_spec_name("t3a.xlarge"), "t3a.xlarge");
        assert_eq!(short_spec_name(""), "");
    }

    #[test]
    fn test_provider_tag() {
        assert_eq!(provider_tag("aws-ap-northeast-2"), "AWS");
        assert_eq!(provider_tag("gcp"), "GCP");
        assert_eq!(provider_tag(""), "");
    }

    #[test]
    fn test_image_distribution_precedence() {
        let mut image = ImageInfo {
            os_distribution: "Ubuntu 22.04~".to_string(),
            os_type: "ubuntu 22.04".to_string(),
            os_platform: "Linux/UNIX".to_string(),
            ..Default::default()
        };
        assert_eq!(image_distribution(&image), "Ubuntu 22.04~");
        assert_eq!(image_os_version(&image), "Ubuntu 22.04~");

        image.os_distribution.clear();
        assert_eq!(image_distribution(&image), "ubuntu 22.04");
        assert_eq!(image_os_version(&image), "ubuntu 22.04");

        image.os_type.clear();
        assert_eq!(image_distribution(&image), "Linux/UNIX");
        assert_eq!(image_os_version(&image), "");
    }

    #[test]
    fn test_firewall_port_projected_to_both_ends() {
        let sg = SecurityGroupInfo {
            name: "sg-web".to_string(),
            vnet_id: "vnet-01".to_string(),
            firewall_rules: vec![FirewallRuleInfo {
                direction: "inbound".to_string(),
                protocol: "TCP".to_string(),
                port: "443".to_string(),
                cidr: "0.0.0.0/0".to_string(),
            }],
            ..Default::default()
        };

        let record = security_group_record(sg);

        assert_eq!(record.rule_count, 1);
        assert_eq!(record.vnet_name, "vnet-01");
        assert_eq!(record.rules[0].from_port, "443");
        assert_eq!(record.rules[0].to_port, "443");
    }

    #[test]
    fn test_vnet_region_is_always_empty() {
        let vnet = VNetInfo {
            name: "vnet-01".to_string(),
            connection_name: "aws-ap-northeast-2".to_string(),
            subnet_info_list: vec![SubnetInfo::default(), SubnetInfo::default()],
            ..Default::default()
        };

        let record = vnet_record(vnet);

        assert_eq!(record.region, "");
        assert_eq!(record.subnet_count, 2);
    }

    #[test]
    fn test_vm_projection_without_spec_or_image() {
        let spec = vm_spec("aws+us-east-1+m5.large", None);
        assert_eq!(spec.name, "m5.large");
        assert_eq!(spec.vcpus, 0);
        assert_eq!(spec.memory_gib, 0.0);
        assert_eq!(spec.architecture, "");

        assert_eq!(vm_image(None), ReportVmImage::default());
    }
}
