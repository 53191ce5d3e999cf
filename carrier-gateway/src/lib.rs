pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use metrics_exporter_prometheus::PrometheusHandle;
use services::UpstreamClient;
use std::sync::Arc;

/// Shared application state. Immutable once built; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    /// Renders `/metrics`. `None` when no recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(upstream: Arc<UpstreamClient>) -> Self {
        Self {
            upstream,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
