use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;
use crate::logger::format::LoggerFormat;

/// Directives appended to the user level so HTTP internals stay quiet.
const QUIET_DEPENDENCIES: &str = "hyper=warn,reqwest=warn";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `nakivo_prometheus=debug`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
        }
    }
}

impl LoggerConfig {
    pub fn new(format: &str, level: &str) -> Result<Self, LoggerError> {
        let cfg = Self {
            format: format.parse()?,
            level: level.trim().to_string(),
            ..Default::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.level.is_empty() {
            return Err(LoggerError::EmptyLevel);
        }
        Ok(())
    }

    /// `EnvFilter` for [`LoggerConfig::directives`].
    pub fn filter(&self) -> Result<EnvFilter, LoggerError> {
        self.validate()?;
        EnvFilter::try_new(self.directives()).map_err(|source| LoggerError::InvalidLevel {
            level: self.level.clone(),
            source,
        })
    }

    /// Full filter directive: the configured level plus dependency overrides.
    pub fn directives(&self) -> String {
        format!("{},{QUIET_DEPENDENCIES}", self.level)
    }
}
