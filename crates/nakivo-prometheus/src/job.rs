use std::sync::Arc;

use nakivo_client::NakivoApi;
use nakivo_model::{JobId, JobInfo, JobState};
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::Error;
use tokio::runtime::Handle;
use tracing::warn;

use crate::descriptor::{MetricDescriptor, MetricTable};
use crate::error::ScrapeError;
use crate::namespace::Namespace;
use crate::stats::ScrapeStats;

const SUBSYSTEM: &str = "job";
const STATS_SUBSYSTEM: &str = "job_stats";
const LABELS: &[&str] = &["id"];

/// Fields of a job summary that are exported.
///
/// Only last-run figures are kept. The job's VM and disk inventory counts are
/// left out; the group collector reports inventory totals.
struct JobInfoResponse {
    last_recent_status: String,
    last_recent_speed: i64,
    last_recent_duration_ms: i64,
    last_recent_data_kb: i64,
    last_recent_vms_ok: i64,
    last_recent_vms_failed: i64,
    last_recent_vms_stopped: i64,
    last_recent_compression_ratio: i64,
}

impl From<&JobInfo> for JobInfoResponse {
    fn from(info: &JobInfo) -> Self {
        Self {
            last_recent_status: info.lr_state.clone(),
            last_recent_speed: info.lr_speed,
            last_recent_duration_ms: info.lr_duration_ms,
            last_recent_data_kb: info.lr_data_kb,
            last_recent_vms_ok: info.lr_vm_ok,
            last_recent_vms_failed: info.lr_vm_failed,
            last_recent_vms_stopped: info.lr_vm_stopped,
            last_recent_compression_ratio: info.lr_compression_ratio,
        }
    }
}

/// Health of a job state string: 1 for OK/waiting/running, 0 for anything else.
pub fn status_health(state: &str) -> f64 {
    if JobState::from(state).is_healthy() {
        1.0
    } else {
        0.0
    }
}

/// Collector for a single job, labeled `id="<job id>"`.
pub struct JobCollector {
    id: JobId,
    id_label: String,
    client: Arc<dyn NakivoApi>,
    runtime: Handle,
    stats: ScrapeStats,
    metrics: MetricTable<JobInfoResponse>,
}

impl JobCollector {
    pub fn new(
        namespace: &Namespace,
        client: Arc<dyn NakivoApi>,
        runtime: Handle,
        id: JobId,
    ) -> Result<Self, Error> {
        let gauge = |name: &str, help: &str, extract: fn(&JobInfoResponse) -> f64| {
            MetricDescriptor::gauge(namespace, SUBSYSTEM, name, help, LABELS, extract)
        };

        let metrics = MetricTable::new(vec![
            gauge(
                "last_recent_status",
                "The status of the last job run.",
                |r| status_health(&r.last_recent_status),
            )?,
            gauge(
                "last_recent_speed",
                "The speed of the last job run.",
                |r| r.last_recent_speed as f64,
            )?,
            gauge(
                "last_recent_duration_ms",
                "The duration of the last job run.",
                |r| r.last_recent_duration_ms as f64,
            )?,
            gauge(
                "last_recent_data_kb",
                "The amount of data transferred during the last job run.",
                |r| r.last_recent_data_kb as f64,
            )?,
            gauge(
                "last_recent_vms_ok",
                "The amount of virtual machines successfully processed during the last job run.",
                |r| r.last_recent_vms_ok as f64,
            )?,
            gauge(
                "last_recent_vms_failed",
                "The amount of virtual machines failed during the last job run.",
                |r| r.last_recent_vms_failed as f64,
            )?,
            gauge(
                "last_recent_vms_stopped",
                "The amount of virtual machines stopped during the last job run.",
                |r| r.last_recent_vms_stopped as f64,
            )?,
            gauge(
                "last_recent_compression_ratio",
                "The compression ratio during the last job run.",
                |r| r.last_recent_compression_ratio as f64,
            )?,
        ]);

        Ok(Self {
            id,
            id_label: id.to_string(),
            client,
            runtime,
            stats: ScrapeStats::new(namespace, STATS_SUBSYSTEM, "job")?,
            metrics,
        })
    }

    fn scrape(&self) -> Result<Vec<MetricFamily>, ScrapeError> {
        let listing = self.runtime.block_on(self.client.fetch_job_info(&[self.id]))?;
        let info = listing
            .single()
            .ok_or(ScrapeError::UnexpectedCount(listing.children.len()))?;

        let resp = JobInfoResponse::from(info);
        Ok(self.metrics.project(&resp, &[self.id_label.as_str()])?)
    }
}

impl Collector for JobCollector {
    fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.metrics.desc();
        descs.extend(self.stats.desc());
        descs
    }

    fn collect(&self) -> Vec<MetricFamily> {
        self.stats.observe(|| {
            self.scrape().inspect_err(|e| {
                warn!(job_id = self.id, error = %e, "failed to fetch job info stat");
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use nakivo_client::{ClientConfig, NakivoClient};
    use nakivo_model::JobInfoListing;
    use prometheus::Registry;

    use super::*;
    use crate::testing::{MockApi, family_names, render, runtime, samples};

    fn nightly() -> JobInfo {
        JobInfo {
            id: 9,
            name: "nightly".to_string(),
            vm_count: 3,
            disk_count: 5,
            sources_size: 0,
            lr_state: "OK".to_string(),
            lr_speed: 120,
            lr_duration_ms: 4500,
            lr_data_kb: 20480,
            lr_vm_ok: 3,
            lr_vm_failed: 0,
            lr_vm_stopped: 0,
            lr_compression_ratio: 2,
        }
    }

    fn collector(api: Arc<MockApi>, rt: &tokio::runtime::Runtime) -> JobCollector {
        JobCollector::new(&Namespace::default(), api, rt.handle().clone(), 9).unwrap()
    }

    #[test]
    fn status_mapping_is_total() {
        for s in ["OK", "WAITING_DEMAND", "WAITING_SCHEDULE", "RUNNING"] {
            assert_eq!(status_health(s), 1.0, "{s}");
        }
        for s in ["FAILED", "STOPPED", "", "ok", "DELETED", " OK"] {
            assert_eq!(status_health(s), 0.0, "{s:?}");
        }
    }

    #[test]
    fn successful_scrape_projects_every_field() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(vec![nightly()]))));
        let collector = collector(api.clone(), &rt);

        let text = render(&collector.collect());
        let lines = samples(&text);

        assert_eq!(lines.len(), 2 + 8);
        for expected in [
            "nakivo_job_last_recent_status{id=\"9\"} 1",
            "nakivo_job_last_recent_speed{id=\"9\"} 120",
            "nakivo_job_last_recent_duration_ms{id=\"9\"} 4500",
            "nakivo_job_last_recent_data_kb{id=\"9\"} 20480",
            "nakivo_job_last_recent_vms_ok{id=\"9\"} 3",
            "nakivo_job_last_recent_vms_failed{id=\"9\"} 0",
            "nakivo_job_last_recent_vms_stopped{id=\"9\"} 0",
            "nakivo_job_last_recent_compression_ratio{id=\"9\"} 2",
            "nakivo_job_stats_up 1",
            "nakivo_job_stats_total_scrapes 1",
        ] {
            assert!(lines.contains(&expected), "missing {expected} in\n{text}");
        }
        assert_eq!(api.requested_ids(), vec![vec![9]]);
    }

    #[test]
    fn failed_job_reports_zero_status() {
        let rt = runtime();
        let mut job = nightly();
        job.lr_state = "FAILED".to_string();
        job.lr_vm_ok = 1;
        job.lr_vm_failed = 2;
        let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(vec![job]))));
        let collector = collector(api, &rt);

        let text = render(&collector.collect());
        let lines = samples(&text);
        assert!(lines.contains(&"nakivo_job_last_recent_status{id=\"9\"} 0"));
        assert!(lines.contains(&"nakivo_job_last_recent_vms_failed{id=\"9\"} 2"));
        assert!(lines.contains(&"nakivo_job_stats_up 1"));
    }

    #[test]
    fn client_error_reports_down() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Err("session expired".to_string())));
        let collector = collector(api, &rt);

        let text = render(&collector.collect());
        assert_eq!(
            samples(&text),
            vec!["nakivo_job_stats_up 0", "nakivo_job_stats_total_scrapes 1"]
        );
    }

    #[test]
    fn network_error_reports_down() {
        let rt = runtime();
        let cfg = ClientConfig {
            endpoint: "http://127.0.0.1/c/router".to_string(),
            port: 1,
            timeout: std::time::Duration::from_millis(500),
            ..Default::default()
        };
        let client: Arc<dyn NakivoApi> = Arc::new(NakivoClient::new(&cfg).unwrap());
        let collector =
            JobCollector::new(&Namespace::default(), client, rt.handle().clone(), 9).unwrap();

        let text = render(&collector.collect());
        assert_eq!(
            samples(&text),
            vec!["nakivo_job_stats_up 0", "nakivo_job_stats_total_scrapes 1"]
        );
    }

    #[test]
    fn zero_or_many_records_report_down() {
        let rt = runtime();
        for children in [vec![], vec![nightly(), nightly()]] {
            let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(children))));
            let collector = collector(api.clone(), &rt);

            let text = render(&collector.collect());
            assert_eq!(samples(&text).len(), 2);
            assert!(text.contains("nakivo_job_stats_up 0"));
            assert_eq!(api.calls(), 1);
        }
    }

    #[test]
    fn total_scrapes_counts_every_collect() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Err("down".to_string())));
        let collector = collector(api.clone(), &rt);

        for n in 1..=3 {
            let text = render(&collector.collect());
            assert!(text.contains(&format!("nakivo_job_stats_total_scrapes {n}")));
        }
        assert_eq!(api.calls(), 3);
    }

    #[test]
    fn describe_matches_collect() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(vec![nightly()]))));
        let collector = collector(api, &rt);

        let described: BTreeSet<String> =
            collector.desc().iter().map(|d| d.fq_name.clone()).collect();
        let collected: BTreeSet<String> =
            family_names(&render(&collector.collect())).into_iter().collect();

        assert_eq!(described.len(), 10);
        assert_eq!(described, collected);
        for d in collector.desc() {
            if d.fq_name.starts_with("nakivo_job_stats_") {
                assert!(d.variable_labels.is_empty());
            } else {
                assert_eq!(d.variable_labels, vec!["id".to_string()]);
            }
        }
    }

    #[test]
    fn inventory_counts_are_not_exported() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(vec![nightly()]))));
        let collector = collector(api, &rt);

        let names = family_names(&render(&collector.collect()));
        assert!(names.iter().all(|n| n.starts_with("nakivo_job_")));
        assert!(!names.iter().any(|n| n.contains("vm_count") || n.contains("disk")));
        assert!(!names.iter().any(|n| n.contains("sources_size")));
    }

    #[test]
    fn registers_and_gathers() {
        let rt = runtime();
        let api = Arc::new(MockApi::jobs(Ok(JobInfoListing::new(vec![nightly()]))));
        let registry = Registry::new();
        registry.register(Box::new(collector(api.clone(), &rt))).unwrap();

        // Same names again must be rejected at registration time.
        assert!(registry.register(Box::new(collector(api, &rt))).is_err());

        let text = render(&registry.gather());
        assert!(text.contains("nakivo_job_last_recent_speed{id=\"9\"} 120"));
    }
}
