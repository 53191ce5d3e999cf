//! Router assembly and server lifecycle.

use crate::config::GatewayConfig;
use crate::handlers::{
    app::health_check,
    chat::{chat_handler, generate_json_handler},
    metrics::metrics,
    shipping::{
        carrier_interactive_handler, carrier_rate_handler, customer_sentiment_handler,
        process_shipping_handler, shipping_cost_handler, state_coverage_handler,
    },
};
use crate::models::route::Route;
use crate::services::UpstreamClient;
use crate::AppState;
use axum::{
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use service_core::observability::REQUEST_ID_HEADER;
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/metrics", get(metrics))
        .route(Route::Chat.path(), post(chat_handler))
        .route(Route::GenerateJson.path(), post(generate_json_handler))
        .route(Route::ProcessShipping.path(), post(process_shipping_handler))
        .route(
            Route::StateCoverageComparison.path(),
            post(state_coverage_handler),
        )
        .route(
            Route::CustomerSentimentComparison.path(),
            post(customer_sentiment_handler),
        )
        .route(
            Route::CarrierInteractiveComparison.path(),
            post(carrier_interactive_handler),
        )
        .route(
            Route::ShippingCostComparison.path(),
            post(shipping_cost_handler),
        )
        .route(
            Route::CarrierRateComparison.path(),
            post(carrier_rate_handler),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::InternalError("Internal server error".to_string()).into_response()
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(
        config: GatewayConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Result<Self, AppError> {
        let upstream = Arc::new(UpstreamClient::new(config.upstreams.clone()));

        for route in Route::ALL {
            tracing::info!(
                route = %route,
                upstream = %config.upstreams.endpoint(route),
                "Registered forwarding route"
            );
        }

        let mut state = AppState::new(upstream);
        if let Some(handle) = metrics {
            state = state.with_metrics(handle);
        }

        // port 0 = random port for testing
        let address = format!("{}:{}", config.common.host, config.common.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
