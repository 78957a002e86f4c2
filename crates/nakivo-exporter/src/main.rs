mod cli;
mod error;
mod http;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use prometheus::Registry;
use tokio::{net::TcpListener, runtime::Handle};
use tracing::{info, warn};

use nakivo_client::{NakivoApi, NakivoClient};
use nakivo_model::JobId;
use nakivo_observe::logger_init;
use nakivo_prometheus::{JobCollector, JobGroupCollector, Namespace, build_info};

use crate::cli::Cli;
use crate::http::MetricsApi;

const EXPORTER: &str = "nakivo_exporter";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1) Logger
    logger_init(&cli.logger_config()?)?;

    // 2) Director session
    let client_cfg = cli.client_config();
    let client = NakivoClient::new(&client_cfg).context("failed to create nakivo client")?;
    client
        .login(&client_cfg.user, &client_cfg.password)
        .await
        .context("failed to login to nakivo")?;
    info!(endpoint = %client.url(), user = %client_cfg.user, "logged in to director");

    // 3) Collectors
    let client: Arc<dyn NakivoApi> = Arc::new(client);
    let registry = build_registry(&cli.namespace(), client, Handle::current(), cli.job_id)?;

    // 4) Exposition
    info!(version = VERSION, "starting {EXPORTER}");
    let listener = TcpListener::bind(cli.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_address))?;
    info!(address = %cli.listen_address, path = %cli.telemetry_path, "listening");

    let router = MetricsApi::new(Arc::new(registry), cli.telemetry_path).router();
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("shutting down...");
    Ok(())
}

fn build_registry(
    namespace: &Namespace,
    client: Arc<dyn NakivoApi>,
    runtime: Handle,
    job_id: JobId,
) -> Result<Registry, prometheus::Error> {
    let registry = Registry::new();
    registry.register(Box::new(build_info(EXPORTER, VERSION)?))?;
    registry.register(Box::new(JobCollector::new(
        namespace,
        Arc::clone(&client),
        runtime.clone(),
        job_id,
    )?))?;
    registry.register(Box::new(JobGroupCollector::new(namespace, client, runtime)?))?;
    Ok(registry)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
