use std::sync::Arc;

use nakivo_client::NakivoApi;
use nakivo_model::JobGroup;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::Error;
use tokio::runtime::Handle;
use tracing::warn;

use crate::descriptor::{MetricDescriptor, MetricTable};
use crate::error::ScrapeError;
use crate::namespace::Namespace;
use crate::stats::ScrapeStats;

const SUBSYSTEM: &str = "group";
const STATS_SUBSYSTEM: &str = "group_stats";

struct JobGroupResponse {
    job_count: i64,
    vm_count: i64,
    disk_count: i64,
    last_recent_ok: i64,
    last_recent_failed: i64,
    last_recent_stopped: i64,
}

impl From<&JobGroup> for JobGroupResponse {
    fn from(group: &JobGroup) -> Self {
        Self {
            job_count: group.job_count_enabled,
            vm_count: group.vm_count,
            disk_count: group.disk_count,
            last_recent_ok: group.lr_job_ok,
            last_recent_failed: group.lr_job_failed,
            last_recent_stopped: group.lr_job_stopped,
        }
    }
}

/// Collector for the top-level job group. Emits no labels.
pub struct JobGroupCollector {
    client: Arc<dyn NakivoApi>,
    runtime: Handle,
    stats: ScrapeStats,
    metrics: MetricTable<JobGroupResponse>,
}

impl JobGroupCollector {
    pub fn new(namespace: &Namespace, client: Arc<dyn NakivoApi>, runtime: Handle) -> Result<Self, Error> {
        let gauge = |name: &str, help: &str, extract: fn(&JobGroupResponse) -> f64| {
            MetricDescriptor::gauge(namespace, SUBSYSTEM, name, help, &[], extract)
        };

        let metrics = MetricTable::new(vec![
            gauge("jobs_total", "The number of enabled jobs.", |r| r.job_count as f64)?,
            gauge(
                "vms_total",
                "The number of virtual machines processed by the jobs in the group.",
                |r| r.vm_count as f64,
            )?,
            gauge(
                "disks_total",
                "The number of disks processed by the jobs in the group.",
                |r| r.disk_count as f64,
            )?,
            gauge(
                "last_recent_jobs_ok",
                "The number of successful jobs during the last run.",
                |r| r.last_recent_ok as f64,
            )?,
            gauge(
                "last_recent_jobs_failed",
                "The number of failed jobs during the last run.",
                |r| r.last_recent_failed as f64,
            )?,
            gauge(
                "last_recent_jobs_stopped",
                "The number of stopped jobs during the last run.",
                |r| r.last_recent_stopped as f64,
            )?,
        ]);

        Ok(Self {
            client,
            runtime,
            stats: ScrapeStats::new(namespace, STATS_SUBSYSTEM, "group")?,
            metrics,
        })
    }

    fn scrape(&self) -> Result<Vec<MetricFamily>, ScrapeError> {
        let listing = self.runtime.block_on(self.client.list_job_groups())?;
        // The fixed call parameters yield a single top-level aggregate.
        let group = listing
            .single()
            .ok_or(ScrapeError::UnexpectedCount(listing.children.len()))?;

        Ok(self.metrics.project(&JobGroupResponse::from(group), &[])?)
    }
}

impl Collector for JobGroupCollector {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.metrics.desc();
        descs.extend(self.stats.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.stats.observe(|| {
            self.scrape().inspect_err(|e| {
                warn!(error = %e, "failed to fetch group stat");
            })
        })
    }
}
