use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{CounterVec, Error, GaugeVec};

use crate::namespace::Namespace;

/// Pure projection of a raw response onto a sample value.
pub type Extractor<R> = fn(&R) -> f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Gauge,
    Counter,
}

enum Family {
    Gauge(GaugeVec),
    Counter(CounterVec),
}

/// One exported metric: name, help, kind, label names and how to compute its
/// value from a raw response of type `R`.
pub struct MetricDescriptor<R> {
    kind: MetricKind,
    family: Family,
    extract: Extractor<R>,
}

impl<R> MetricDescriptor<R> {
    pub fn new(
        namespace: &Namespace,
        subsystem: &str,
        name: &str,
        help: &str,
        kind: MetricKind,
        labels: &[&str],
        extract: Extractor<R>,
    ) -> Result<Self, Error> {
        let opts = namespace.opts(subsystem, name, help);
        let family = match kind {
            MetricKind::Gauge => Family::Gauge(GaugeVec::new(opts, labels)?),
            MetricKind::Counter => Family::Counter(CounterVec::new(opts, labels)?),
        };
        Ok(Self {
            kind,
            family,
            extract,
        })
    }

    pub fn gauge(
        namespace: &Namespace,
        subsystem: &str,
        name: &str,
        help: &str,
        labels: &[&str],
        extract: Extractor<R>,
    ) -> Result<Self, Error> {
        Self::new(namespace, subsystem, name, help, MetricKind::Gauge, labels, extract)
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn desc(&self) -> Vec<&Desc> {
        match &self.family {
            Family::Gauge(vec) => vec.desc(),
            Family::Counter(vec) => vec.desc(),
        }
    }

    /// Compute the value for `raw` and return it as a metric family.
    ///
    /// `label_values` must match the label names given at construction.
    pub fn project(&self, raw: &R, label_values: &[&str]) -> Result<Vec<MetricFamily>, Error> {
        let value = (self.extract)(raw);
        match &self.family {
            Family::Gauge(vec) => {
                vec.get_metric_with_label_values(label_values)?.set(value);
                Ok(vec.collect())
            }
            Family::Counter(vec) => {
                if value.is_nan() || value < 0.0 {
                    return Err(Error::Msg(format!("counter value must be non-negative, got {value}")));
                }
                let counter = vec.get_metric_with_label_values(label_values)?;
                counter.reset();
                counter.inc_by(value);
                Ok(vec.collect())
            }
        }
    }
}

/// Static list of descriptors of one collector.
///
/// Built once at construction and reused on every scrape.
pub struct MetricTable<R> {
    descriptors: Vec<MetricDescriptor<R>>,
}

impl<R> MetricTable<R> {
    pub fn new(descriptors: Vec<MetricDescriptor<R>>) -> Self {
        Self { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn desc(&self) -> Vec<&Desc> {
        self.descriptors.iter().flat_map(|d| d.desc()).collect()
    }

    /// Project `raw` through every descriptor; fails on the first error so that
    /// a partial set is never emitted.
    pub fn project(&self, raw: &R, label_values: &[&str]) -> Result<Vec<MetricFamily>, Error> {
        let mut families = Vec::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            families.extend(descriptor.project(raw, label_values)?);
        }
        Ok(families)
    }
}
