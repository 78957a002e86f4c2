use async_trait::async_trait;
use nakivo_model::{JobGroupListing, JobId, JobInfoListing};

use crate::errors::ClientError;

/// Read operations of the Director used by the exporter.
///
/// Implementations are expected to be already authenticated and safe to call
/// concurrently from several collectors.
#[async_trait]
pub trait NakivoApi: Send + Sync + 'static {
    /// List job groups without extra fields and without flattening.
    async fn list_job_groups(&self) -> Result<JobGroupListing, ClientError>;

    /// Fetch job summaries for the given ids, first page only.
    async fn fetch_job_info(&self, ids: &[JobId]) -> Result<JobInfoListing, ClientError>;
}
