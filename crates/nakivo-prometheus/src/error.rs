use nakivo_client::ClientError;
use thiserror::Error;

/// Why a single scrape failed. Every variant is reported identically as `up=0`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("director call failed: {0}")]
    Client(#[from] ClientError),

    #[error("expected exactly one record, got {0}")]
    UnexpectedCount(usize),

    #[error("failed to project metrics: {0}")]
    Projection(#[from] prometheus::Error),
}
