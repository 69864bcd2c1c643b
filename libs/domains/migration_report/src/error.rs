use std::time::Duration;
use thiserror::Error;

/// Result type for a single catalog read
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Result type for report generation
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure of one read against the inventory service.
///
/// Collectors do not distinguish between variants: every one of them turns
/// into a skip-with-warning.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the inventory service
    #[error("Catalog returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// Read exceeded the per-call timeout
    #[error("Catalog request timed out after {0} ms")]
    Timeout(u64),
}

/// Fatal outcomes of a report generation call
#[derive(Debug, Error)]
pub enum ReportError {
    /// The infrastructure snapshot could not be read; no report is possible
    #[error("Failed to retrieve infrastructure {infra_id} in namespace {ns_id}: {source}")]
    InfraUnavailable {
        ns_id: String,
        infra_id: String,
        #[source]
        source: CatalogError,
    },

    /// Invalid request parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The overall deadline elapsed before the report was assembled
    #[error("Report generation timed out after {0} ms")]
    Timeout(u64),
}

/// Whole milliseconds of a deadline, saturating at `u64::MAX`
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
