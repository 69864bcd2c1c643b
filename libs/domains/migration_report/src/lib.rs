//! Migration Report Domain
//!
//! Synthesizes a normalized migration report for a provisioned multi-cloud
//! infrastructure from the resources registered in an inventory service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │     Service      │  ← Report assembly, summary, metadata
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ Extractor / Cost │  ← Deduplicated references, cost rollups
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │    Collectors    │  ← Fault-tolerant fetch + normalization
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │  Catalog Client  │  ← Read-only inventory access (trait + HTTP impl)
//! └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_migration_report::{HttpCatalogClient, MigrationReportService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpCatalogClient::new("http://localhost:1323/tumblebug");
//! let service = MigrationReportService::new(client);
//!
//! let report = service.generate("mig01", "mmci01").await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod collector;
pub mod cost;
pub mod error;
pub mod extractor;
pub mod http_client;
pub mod models;
pub mod normalize;
pub mod report;
pub mod service;

// Re-export commonly used types
pub use catalog::{CatalogClient, SYSTEM_NAMESPACE};
pub use error::{CatalogError, CatalogResult, ReportError, ReportResult};
pub use extractor::{IdSet, ResourceRefs};
pub use http_client::HttpCatalogClient;
pub use models::{
    FirewallRuleInfo, ImageInfo, InfraInfo, SecurityGroupInfo, SpecInfo, SshKeyInfo, SubnetInfo,
    VNetInfo, VmInfo,
};
pub use report::{
    ComputeResources, CostEstimation, MigrationReport, MigrationSummary, NetworkResources,
    ResourceKind, ResourceWarning, SecurityResources,
};
pub use service::{MigrationReportService, ReportOptions};
