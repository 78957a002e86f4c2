use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::debug;

use crate::error::ExporterError;

/// HTTP exposition service builder.
pub struct MetricsApi {
    registry: Arc<Registry>,
    telemetry_path: String,
}

impl MetricsApi {
    pub fn new(registry: Arc<Registry>, telemetry_path: impl Into<String>) -> Self {
        Self {
            registry,
            telemetry_path: telemetry_path.into(),
        }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET <telemetry path> - Prometheus text exposition
    /// - GET / - Landing page
    pub fn router(self) -> Router {
        let path = self.telemetry_path.clone();
        Router::new()
            .route(&path, get(metrics))
            .route("/", get(landing))
            .with_state(Arc::new(self))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET <telemetry path>
///
/// Collectors block on the Director, so gathering runs on the blocking pool.
async fn metrics(State(api): State<Arc<MetricsApi>>) -> Result<impl IntoResponse, ExporterError> {
    debug!("gathering metrics");
    let registry = Arc::clone(&api.registry);
    let body = tokio::task::spawn_blocking(move || render(&registry)).await??;

    let encoder = TextEncoder::new();
    Ok(([(header::CONTENT_TYPE, encoder.format_type().to_string())], body))
}

/// GET /
async fn landing(State(api): State<Arc<MetricsApi>>) -> Html<String> {
    Html(landing_page(&api.telemetry_path))
}

fn render(registry: &Registry) -> Result<Vec<u8>, ExporterError> {
    let families = registry.gather();
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&families, &mut buffer)?;
    Ok(buffer)
}

fn landing_page(telemetry_path: &str) -> String {
    format!(
        r#"<html>
<head><title>Nakivo Exporter</title></head>
<body>
<h1>Nakivo Exporter</h1>
<p><a href="{telemetry_path}">Metrics</a></p>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use nakivo_prometheus::build_info;
    use tokio::net::TcpListener;

    use super::*;

    fn registry() -> Arc<Registry> {
        let registry = Registry::new();
        registry
            .register(Box::new(build_info("nakivo_exporter", "1.2.3").unwrap()))
            .unwrap();
        Arc::new(registry)
    }

    async fn serve(api: MetricsApi) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, api.router()).await.unwrap();
        });
        addr
    }

    #[test]
    fn renders_registered_metrics() {
        let text = String::from_utf8(render(&registry()).unwrap()).unwrap();
        assert!(text.contains("nakivo_exporter_build_info{version=\"1.2.3\"} 1"));
    }

    #[test]
    fn landing_links_to_telemetry_path() {
        let page = landing_page("/probe");
        assert!(page.contains(r#"<a href="/probe">Metrics</a>"#));
        assert!(page.contains("<title>Nakivo Exporter</title>"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn serves_metrics_and_landing_page() {
        let addr = serve(MetricsApi::new(registry(), "/metrics")).await;

        let resp = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();
        assert!(resp.status().is_success());
        let content_type = resp.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = resp.text().await.unwrap();
        assert!(body.contains("nakivo_exporter_build_info{version=\"1.2.3\"} 1"));

        let landing = reqwest::get(format!("http://{addr}/")).await.unwrap();
        assert!(landing.text().await.unwrap().contains(r#"href="/metrics""#));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn custom_telemetry_path() {
        let addr = serve(MetricsApi::new(registry(), "/probe")).await;

        let ok = reqwest::get(format!("http://{addr}/probe")).await.unwrap();
        assert!(ok.status().is_success());

        let missing = reqwest::get(format!("http://{addr}/metrics")).await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    }
}
