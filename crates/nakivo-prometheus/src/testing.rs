use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nakivo_client::{ClientError, NakivoApi};
use nakivo_model::{JobGroupListing, JobId, JobInfoListing};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, TextEncoder};

/// Scripted Director answering every call with a fixed result.
pub struct MockApi {
    jobs: Mutex<Result<JobInfoListing, String>>,
    groups: Mutex<Result<JobGroupListing, String>>,
    calls: AtomicUsize,
    requested_ids: Mutex<Vec<Vec<JobId>>>,
}

impl MockApi {
    pub fn jobs(jobs: Result<JobInfoListing, String>) -> Self {
        Self {
            jobs: Mutex::new(jobs),
            groups: Mutex::new(Err("not scripted".to_string())),
            calls: AtomicUsize::new(0),
            requested_ids: Mutex::new(Vec::new()),
        }
    }

    pub fn groups(groups: Result<JobGroupListing, String>) -> Self {
        Self {
            jobs: Mutex::new(Err("not scripted".to_string())),
            groups: Mutex::new(groups),
            calls: AtomicUsize::new(0),
            requested_ids: Mutex::new(Vec::new()),
        }
    }

    pub fn set_groups(&self, groups: Result<JobGroupListing, String>) {
        *self.groups.lock().unwrap() = groups;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_ids(&self) -> Vec<Vec<JobId>> {
        self.requested_ids.lock().unwrap().clone()
    }
}

#[async_trait]
impl NakivoApi for MockApi {
    async fn list_job_groups(&self) -> Result<JobGroupListing, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.groups.lock().unwrap().clone().map_err(ClientError::InvalidResponse)
    }

    async fn fetch_job_info(&self, ids: &[JobId]) -> Result<JobInfoListing, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested_ids.lock().unwrap().push(ids.to_vec());
        self.jobs.lock().unwrap().clone().map_err(ClientError::InvalidResponse)
    }
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

pub fn render(families: &[MetricFamily]) -> String {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Sample lines of a text exposition, comments stripped.
pub fn samples(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Metric names announced by `# TYPE` lines.
pub fn family_names(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("# TYPE "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}
