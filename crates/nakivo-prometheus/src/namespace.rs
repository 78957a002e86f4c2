use std::fmt;

use prometheus::Opts;

pub const DEFAULT_NAMESPACE: &str = "nakivo";

/// Metric name prefix shared by all collectors.
///
/// Names are built as `<namespace>_<subsystem>_<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self(namespace.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn opts(&self, subsystem: &str, name: &str, help: impl Into<String>) -> Opts {
        Opts::new(name, help)
            .namespace(self.0.clone())
            .subsystem(subsystem)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
