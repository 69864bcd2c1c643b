use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{ImageInfo, InfraInfo, SecurityGroupInfo, SpecInfo, SshKeyInfo, VNetInfo};

/// Namespace that holds the shared machine specs and images
pub const SYSTEM_NAMESPACE: &str = "system";

/// Read-only interface to the inventory service
///
/// Each call reads exactly one resource. Implementations must be safe to
/// share across concurrent fetches; the report engine never mutates
/// catalog state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Read the infrastructure snapshot (VM list with resource references)
    async fn read_infra(&self, ns_id: &str, infra_id: &str) -> CatalogResult<InfraInfo>;

    /// Read a virtual network including its subnets
    async fn read_vnet(&self, ns_id: &str, vnet_id: &str) -> CatalogResult<VNetInfo>;

    /// Read an SSH credential
    async fn read_ssh_key(&self, ns_id: &str, ssh_key_id: &str) -> CatalogResult<SshKeyInfo>;

    /// Read a security group including its firewall rules
    async fn read_security_group(
        &self,
        ns_id: &str,
        security_group_id: &str,
    ) -> CatalogResult<SecurityGroupInfo>;

    /// Read a machine spec from the given namespace (normally [`SYSTEM_NAMESPACE`])
    async fn read_spec(&self, ns_id: &str, spec_id: &str) -> CatalogResult<SpecInfo>;

    /// Read a machine image from the given namespace (normally [`SYSTEM_NAMESPACE`])
    async fn read_image(&self, ns_id: &str, image_id: &str) -> CatalogResult<ImageInfo>;
}
