use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use nakivo_model::{JobGroupListing, JobId, JobInfoListing, RpcRequest, RpcResponse};

use crate::api::NakivoApi;
use crate::config::ClientConfig;
use crate::errors::ClientError;

const AUTH_ACTION: &str = "AuthenticationManagement";
const JOB_SUMMARY_ACTION: &str = "JobSummaryManagement";

/// Tenant scope used for every call; 0 is the local (non multi-tenant) Director.
const CLIENT_ID: u64 = 0;

/// Longest body excerpt carried by a decode error.
const BODY_EXCERPT: usize = 256;

/// HTTP client for the Director router.
///
/// The session cookie obtained by [`NakivoClient::login`] is kept in the
/// client's cookie store and reused by every later call.
pub struct NakivoClient {
    http: reqwest::Client,
    url: Url,
    tid: AtomicU64,
}

impl NakivoClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self, ClientError> {
        cfg.validate()?;
        let url = cfg.router_url()?;
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .cookie_store(true)
            .danger_accept_invalid_certs(cfg.insecure_skip_verify)
            .build()?;

        Ok(Self {
            http,
            url,
            tid: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Open a session; must succeed before any collector runs.
    pub async fn login(&self, user: &str, password: &str) -> Result<(), ClientError> {
        debug!(user, "logging in to director");
        let _: Option<Value> = self
            .call(AUTH_ACTION, "login", json!([user, password, false]))
            .await?;
        Ok(())
    }

    async fn call<T>(&self, action: &str, method: &str, data: Value) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let tid = self.tid.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(action, method, data, tid);
        debug!(action, method, tid, "sending director rpc");

        let response = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        decode(action, method, &body)
    }

    async fn call_with_data<T>(&self, action: &str, method: &str, data: Value) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        self.call(action, method, data).await?.ok_or_else(|| {
            ClientError::InvalidResponse(format!("{action}.{method} returned no data"))
        })
    }
}

#[async_trait]
impl NakivoApi for NakivoClient {
    async fn list_job_groups(&self) -> Result<JobGroupListing, ClientError> {
        self.call_with_data(
            JOB_SUMMARY_ACTION,
            "getGroupInfo",
            json!([Value::Null, CLIENT_ID, false]),
        )
        .await
    }

    async fn fetch_job_info(&self, ids: &[JobId]) -> Result<JobInfoListing, ClientError> {
        self.call_with_data(JOB_SUMMARY_ACTION, "getJobInfo", json!([ids, CLIENT_ID]))
            .await
    }
}

/// Decode a router response body, turning `exception` envelopes into errors.
fn decode<T>(action: &str, method: &str, body: &str) -> Result<Option<T>, ClientError>
where
    T: DeserializeOwned,
{
    let response: RpcResponse<T> = serde_json::from_str(body).map_err(|e| {
        ClientError::InvalidResponse(format!(
            "failed to parse response: {e}, body: {}",
            excerpt(body)
        ))
    })?;

    if response.is_exception() {
        return Err(ClientError::Rpc {
            action: action.to_string(),
            method: method.to_string(),
            message: response
                .message
                .unwrap_or_else(|| "no message".to_string()),
        });
    }
    Ok(response.data)
}

/// First [`BODY_EXCERPT`] characters of `body`, marked when cut.
fn excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
