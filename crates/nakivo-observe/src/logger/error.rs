use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unsupported --log.format {0:?}: expected text, json or journald")]
    InvalidFormat(String),
    #[error("--log.format=journald needs a Linux build with the `journald` feature")]
    JournaldUnavailable,
    #[error("--log.level must not be empty")]
    EmptyLevel,
    #[error("invalid --log.level {level:?}: {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to connect to journald: {0}")]
    Journald(#[source] std::io::Error),
    #[error("tracing subscriber could not be installed: {0}")]
    Install(#[from] TryInitError),
}
