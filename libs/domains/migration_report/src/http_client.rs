//! Catalog client over the inventory service REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use urlencoding::encode;

use crate::catalog::CatalogClient;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{ImageInfo, InfraInfo, SecurityGroupInfo, SpecInfo, SshKeyInfo, VNetInfo};

/// HTTP implementation of [`CatalogClient`]
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Build a client whose underlying HTTP requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("migration-reporter/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource_url(&self, ns_id: &str, kind: &str, id: &str) -> String {
        format!(
            "{}/ns/{}/resources/{}/{}",
            self.base_url,
            encode(ns_id),
            kind,
            encode(id)
        )
    }

    fn infra_url(&self, ns_id: &str, infra_id: &str) -> String {
        format!(
            "{}/ns/{}/mci/{}",
            self.base_url,
            encode(ns_id),
            encode(infra_id)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, id: &str) -> CatalogResult<T> {
        debug!(url = %url, "Catalog request");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn read_infra(&self, ns_id: &str, infra_id: &str) -> CatalogResult<InfraInfo> {
        self.get_json(&self.infra_url(ns_id, infra_id), infra_id)
            .await
    }

    async fn read_vnet(&self, ns_id: &str, vnet_id: &str) -> CatalogResult<VNetInfo> {
        self.get_json(&self.resource_url(ns_id, "vNet", vnet_id), vnet_id)
            .await
    }

    async fn read_ssh_key(&self, ns_id: &str, ssh_key_id: &str) -> CatalogResult<SshKeyInfo> {
        self.get_json(&self.resource_url(ns_id, "sshKey", ssh_key_id), ssh_key_id)
            .await
    }

    async fn read_security_group(
        &self,
        ns_id: &str,
        security_group_id: &str,
    ) -> CatalogResult<SecurityGroupInfo> {
        self.get_json(
            &self.resource_url(ns_id, "securityGroup", security_group_id),
            security_group_id,
        )
        .await
    }

    async fn read_spec(&self, ns_id: &str, spec_id: &str) -> CatalogResult<SpecInfo> {
        self.get_json(&self.resource_url(ns_id, "spec", spec_id), spec_id)
            .await
    }

    async fn read_image(&self, ns_id: &str, image_id: &str) -> CatalogResult<ImageInfo> {
        self.get_json(&self.resource_url(ns_id, "image", image_id), image_id)
            .await
    }
}
