//! Logging setup for the exporter binary.

mod logger;
pub use logger::*;
