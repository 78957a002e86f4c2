mod config;
mod error;
mod format;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::LoggerFormat;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt};

/// Identifier journald entries are tagged with.
#[cfg(all(target_os = "linux", feature = "journald"))]
const SYSLOG_IDENTIFIER: &str = "nakivo_exporter";

/// Install the global `tracing` subscriber described by `cfg`.
///
/// The filter is built from `--log.level` first, so a bad directive is
/// reported before anything is installed. A second call fails with
/// [`LoggerError::Install`].
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let registry = tracing_subscriber::registry().with(cfg.filter()?);

    match cfg.format {
        LoggerFormat::Text => registry
            .with(
                fmt::layer()
                    .with_ansi(cfg.use_color)
                    .with_target(cfg.with_targets)
                    .with_timer(local_rfc3339()),
            )
            .try_init()?,
        LoggerFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(cfg.with_targets)
                    .with_timer(local_rfc3339()),
            )
            .try_init()?,
        LoggerFormat::Journald => {
            #[cfg(all(target_os = "linux", feature = "journald"))]
            {
                let journald = tracing_journald::layer()
                    .map_err(LoggerError::Journald)?
                    .with_syslog_identifier(SYSLOG_IDENTIFIER.to_string());
                registry.with(journald).try_init()?;
            }
            #[cfg(not(all(target_os = "linux", feature = "journald")))]
            {
                drop(registry);
                return Err(LoggerError::JournaldUnavailable);
            }
        }
    }
    Ok(())
}

/// RFC3339 timestamps in the host's local offset, UTC when it can't be read.
fn local_rfc3339() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}
