use std::sync::{Mutex, PoisonError};

use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Error, Gauge, IntCounter};

use crate::error::ScrapeError;
use crate::namespace::Namespace;

/// Housekeeping metrics every collector reports on each collect.
pub struct ScrapeStats {
    up: Gauge,
    total_scrapes: IntCounter,
    // Serializes overlapping collects of the same collector.
    lock: Mutex<()>,
}

impl ScrapeStats {
    /// `subsystem` is e.g. `job_stats`; `target` names the endpoint in help text.
    pub fn new(namespace: &Namespace, subsystem: &str, target: &str) -> Result<Self, Error> {
        let up = Gauge::with_opts(namespace.opts(
            subsystem,
            "up",
            format!("Was the last scrape of the Nakivo {target} endpoint successful."),
        ))?;
        let total_scrapes = IntCounter::with_opts(namespace.opts(
            subsystem,
            "total_scrapes",
            format!("Current total Nakivo {target} scrapes."),
        ))?;

        Ok(Self {
            up,
            total_scrapes,
            lock: Mutex::new(()),
        })
    }

    pub fn desc(&self) -> Vec<&Desc> {
        let mut descs = self.up.desc();
        descs.extend(self.total_scrapes.desc());
        descs
    }

    pub fn total_scrapes(&self) -> u64 {
        self.total_scrapes.get()
    }

    pub fn is_up(&self) -> bool {
        self.up.get() == 1.0
    }

    /// Run one scrape attempt and return its families followed by `up` and
    /// `total_scrapes`.
    ///
    /// The counter is incremented before `scrape` runs. On error no data
    /// families are returned.
    pub fn observe<F>(&self, scrape: F) -> Vec<MetricFamily>
    where
        F: FnOnce() -> Result<Vec<MetricFamily>, ScrapeError>,
    {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.total_scrapes.inc();

        let (mut families, up) = match scrape() {
            Ok(families) => (families, 1.0),
            Err(_) => (Vec::new(), 0.0),
        };
        self.up.set(up);

        families.extend(self.up.collect());
        families.extend(self.total_scrapes.collect());
        families
    }
}
