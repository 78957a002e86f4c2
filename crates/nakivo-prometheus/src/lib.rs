//! Prometheus collectors for the NAKIVO Director.
//!
//! Each collector performs one Director call per scrape and republishes the
//! result through a static [`MetricTable`]. Scrape health is reported on every
//! collect via `<ns>_<subsystem>_stats_up` and `<ns>_<subsystem>_stats_total_scrapes`.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use nakivo_client::{ClientConfig, NakivoApi, NakivoClient};
//! use nakivo_prometheus::{JobCollector, JobGroupCollector, Namespace, Registry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = tokio::runtime::Runtime::new()?;
//! let client: Arc<dyn NakivoApi> = Arc::new(NakivoClient::new(&ClientConfig::default())?);
//! let ns = Namespace::default();
//!
//! let registry = Registry::new();
//! registry.register(Box::new(JobCollector::new(&ns, client.clone(), runtime.handle().clone(), 9)?))?;
//! registry.register(Box::new(JobGroupCollector::new(&ns, client, runtime.handle().clone())?))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `nakivo_job_stats_up`, `nakivo_job_stats_total_scrapes`
//! - `nakivo_job_last_recent_{status,speed,duration_ms,data_kb,vms_ok,vms_failed,vms_stopped,compression_ratio}{id}`
//! - `nakivo_group_stats_up`, `nakivo_group_stats_total_scrapes`
//! - `nakivo_group_{jobs_total,vms_total,disks_total,last_recent_jobs_ok,last_recent_jobs_failed,last_recent_jobs_stopped}`
//!
//! ## Blocking
//! [`prometheus::core::Collector::collect`] is synchronous while the Director
//! client is async. Collectors drive the request with
//! [`tokio::runtime::Handle::block_on`], so `Registry::gather` must be called
//! off the async workers (e.g. from `tokio::task::spawn_blocking`).

mod namespace;
pub use namespace::{DEFAULT_NAMESPACE, Namespace};

mod descriptor;
pub use descriptor::{Extractor, MetricDescriptor, MetricKind, MetricTable};

mod stats;
pub use stats::ScrapeStats;

mod error;
pub use error::ScrapeError;

mod job;
pub use job::{JobCollector, status_health};

mod group;
pub use group::JobGroupCollector;

mod build_info;
pub use build_info::build_info;

#[cfg(test)]
mod testing;

pub use prometheus::{Encoder, Registry, TextEncoder};
