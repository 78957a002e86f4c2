use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("metrics gathering task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ExporterError {
    fn into_response(self) -> Response {
        error!(error = %self, "failed to serve metrics");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
