use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid client config: {0}")]
    InvalidConfig(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("director rejected {action}.{method}: {message}")]
    Rpc {
        action: String,
        method: String,
        message: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
