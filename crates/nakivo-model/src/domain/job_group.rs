use serde::{Deserialize, Serialize};

use super::nullable::or_default;

/// Aggregate view of a job group as returned by `getGroupInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobGroup {
    #[serde(deserialize_with = "or_default")]
    pub id: i64,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    /// Number of enabled jobs in the group.
    #[serde(deserialize_with = "or_default")]
    pub job_count_enabled: i64,
    #[serde(deserialize_with = "or_default")]
    pub vm_count: i64,
    #[serde(deserialize_with = "or_default")]
    pub disk_count: i64,
    #[serde(deserialize_with = "or_default")]
    pub sources_size: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_job_ok: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_job_failed: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_job_stopped: i64,
}
