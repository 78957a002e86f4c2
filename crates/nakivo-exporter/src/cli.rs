use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use nakivo_client::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_PORT};
use nakivo_model::JobId;
use nakivo_observe::{LoggerConfig, LoggerError};
use nakivo_prometheus::{DEFAULT_NAMESPACE, Namespace};

/// `nakivo_exporter` command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nakivo_exporter",
    about = "Prometheus exporter for NAKIVO Backup & Replication",
    version
)]
pub struct Cli {
    /// Address to listen on for web interface and telemetry.
    #[arg(long = "web.listen-address", value_name = "addr", default_value = ":9777", value_parser = parse_listen_address)]
    pub listen_address: SocketAddr,

    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", value_name = "path", default_value = "/metrics", value_parser = parse_telemetry_path)]
    pub telemetry_path: String,

    /// Ignore certificate and server verification when using a tls connection.
    #[arg(long = "tls.insecure-skip-verify")]
    pub insecure_skip_verify: bool,

    /// HTTP API address of the nakivo endpoint.
    #[arg(long = "nakivo.addr", value_name = "url", default_value = DEFAULT_ENDPOINT)]
    pub nakivo_addr: String,

    /// HTTP API port of the nakivo endpoint.
    #[arg(long = "nakivo.port", value_name = "port", default_value_t = DEFAULT_PORT)]
    pub nakivo_port: u16,

    /// The nakivo user.
    #[arg(long = "nakivo.user", value_name = "user", default_value = "admin")]
    pub nakivo_user: String,

    /// The nakivo user password.
    #[arg(long = "nakivo.password", value_name = "password", env = "NAKIVO_PASSWORD", hide_env_values = true, default_value = "")]
    pub nakivo_password: String,

    /// Timeout for trying to get stats from Nakivo (e.g. 5s, 1500ms, 1m).
    #[arg(long = "nakivo.timeout", value_name = "duration", default_value = "5s", value_parser = parse_duration)]
    pub nakivo_timeout: Duration,

    /// Id of the job reported by the job collector.
    #[arg(long = "nakivo.job-id", value_name = "id", default_value_t = 9)]
    pub job_id: JobId,

    /// Prefix of every exported metric name.
    #[arg(long = "metrics.namespace", value_name = "ns", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,

    /// Log filter directive (error, warn, info, debug, trace or an EnvFilter spec).
    #[arg(long = "log.level", value_name = "level", default_value = "info")]
    pub log_level: String,

    /// Output format of log messages: text, json or journald.
    #[arg(long = "log.format", value_name = "format", default_value = "text")]
    pub log_format: String,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.nakivo_addr.clone(),
            port: self.nakivo_port,
            user: self.nakivo_user.clone(),
            password: self.nakivo_password.clone(),
            timeout: self.nakivo_timeout,
            insecure_skip_verify: self.insecure_skip_verify,
        }
    }

    pub fn logger_config(&self) -> Result<LoggerConfig, LoggerError> {
        LoggerConfig::new(&self.log_format, &self.log_level)
    }

    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.clone())
    }
}

/// Accepts a full socket address or a bare `:port` meaning all interfaces.
fn parse_listen_address(s: &str) -> Result<SocketAddr, String> {
    let s = s.trim();
    let full = match s.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => s.to_string(),
    };
    full.parse()
        .map_err(|e| format!("invalid listen address {s:?}: {e}"))
}

fn parse_telemetry_path(s: &str) -> Result<String, String> {
    if !s.starts_with('/') {
        return Err(format!("telemetry path must start with '/': {s:?}"));
    }
    if s == "/" {
        return Err("telemetry path cannot be '/', it serves the landing page".to_string());
    }
    Ok(s.to_string())
}

/// Parses `500ms`, `5s`, `2m` or a bare number of seconds.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let (value, unit) = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => s.split_at(idx),
        None => (s, "s"),
    };
    let value: u64 = value
        .parse()
        .map_err(|_| format!("invalid duration {s:?}"))?;

    let duration = match unit {
        "ms" => Duration::from_millis(value),
        "s" => Duration::from_secs(value),
        "m" => value
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration too large: {s:?}"))?,
        _ => return Err(format!("invalid duration unit in {s:?} (expected ms, s or m)")),
    };
    if duration.is_zero() {
        return Err(format!("duration must be positive: {s:?}"));
    }
    Ok(duration)
}
