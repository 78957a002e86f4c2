use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of the `type` field for regular calls.
pub const RPC_KIND: &str = "rpc";

/// Outcome reported in the `type` field of a router response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RpcKind {
    Rpc,
    Exception,
    #[serde(other)]
    Other,
}

/// A single call posted to the Director router (`/c/router`).
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub action: String,
    pub method: String,
    pub data: Value,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub tid: u64,
}

impl RpcRequest {
    pub fn new(action: impl Into<String>, method: impl Into<String>, data: Value, tid: u64) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            data,
            kind: RPC_KIND,
            tid,
        }
    }
}

/// Router response envelope.
///
/// On failure the Director answers with `"type": "exception"` and a human
/// readable `message`; `data` is then absent or meaningless.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RpcResponse<T> {
    #[serde(rename = "type")]
    pub kind: RpcKind,
    #[serde(default)]
    pub tid: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> RpcResponse<T> {
    pub fn is_exception(&self) -> bool {
        self.kind == RpcKind::Exception
    }
}
