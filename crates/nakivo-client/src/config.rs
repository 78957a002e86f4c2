use std::fmt;
use std::time::Duration;

use reqwest::Url;

use crate::errors::ClientError;

pub const DEFAULT_ENDPOINT: &str = "https://localhost:4443/c/router";
pub const DEFAULT_PORT: u16 = 4443;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct ClientConfig {
    /// Router URL of the Director.
    pub endpoint: String,
    /// Port applied on top of `endpoint`.
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Per-request timeout, covers connect and body.
    pub timeout: Duration,
    /// Accept self-signed or otherwise invalid appliance certificates.
    pub insecure_skip_verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            port: DEFAULT_PORT,
            user: "admin".to_string(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
            insecure_skip_verify: false,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .finish()
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.endpoint.trim().is_empty() {
            return Err(ClientError::InvalidConfig("endpoint cannot be empty".into()));
        }
        if self.user.trim().is_empty() {
            return Err(ClientError::InvalidConfig("user cannot be empty".into()));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig("timeout must be positive".into()));
        }
        self.router_url().map(|_| ())
    }

    /// Router URL with the configured port applied.
    pub fn router_url(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(self.endpoint.trim())
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidEndpoint(format!(
                "{}: unsupported scheme {}",
                self.endpoint,
                url.scheme()
            )));
        }
        url.set_port(Some(self.port))
            .map_err(|_| ClientError::InvalidEndpoint(format!("{}: cannot carry a port", self.endpoint)))?;
        Ok(url)
    }
}
