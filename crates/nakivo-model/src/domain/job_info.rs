use serde::{Deserialize, Serialize};

use super::nullable::or_default;
use crate::JobId;

/// Summary of a single backup job as returned by `getJobInfo`.
///
/// The `lr*` fields describe the last recent run of the job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobInfo {
    #[serde(deserialize_with = "or_default")]
    pub id: JobId,
    #[serde(deserialize_with = "or_default")]
    pub name: String,
    #[serde(deserialize_with = "or_default")]
    pub vm_count: i64,
    #[serde(deserialize_with = "or_default")]
    pub disk_count: i64,
    /// Parsed for completeness, not exported.
    #[serde(deserialize_with = "or_default")]
    pub sources_size: i64,
    /// Raw state string, see [`crate::JobState`].
    #[serde(deserialize_with = "or_default")]
    pub lr_state: String,
    #[serde(deserialize_with = "or_default")]
    pub lr_speed: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_duration_ms: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_data_kb: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_vm_ok: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_vm_failed: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_vm_stopped: i64,
    #[serde(deserialize_with = "or_default")]
    pub lr_compression_ratio: i64,
}
