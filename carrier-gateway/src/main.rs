use carrier_gateway::config::GatewayConfig;
use carrier_gateway::startup::Application;
use metrics_exporter_prometheus::PrometheusBuilder;
use service_core::observability::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = GatewayConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "carrier-gateway",
        &configuration.common.log_level,
        configuration.common.otlp_endpoint.as_deref(),
    )?;

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    let application = Application::build(configuration, Some(metrics)).await?;

    info!("Starting carrier-gateway on port {}", application.port());
    application.run_until_stopped().await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
