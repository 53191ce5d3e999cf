//! Common helpers for gateway integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use carrier_gateway::config::UpstreamSettings;
use carrier_gateway::models::Route;
use carrier_gateway::services::UpstreamClient;
use carrier_gateway::startup::build_router;
use carrier_gateway::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router whose eight upstreams all live at `base_url`.
pub fn router_for(base_url: &str) -> Router {
    let upstream = Arc::new(UpstreamClient::new(UpstreamSettings::all(base_url)));
    build_router(AppState::new(upstream))
}

/// A base URL nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let address = listener.local_addr().expect("Failed to read probe address");
    drop(listener);
    format!("http://{}", address)
}

pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

/// A body that passes validation on `route`.
pub fn valid_body(route: Route) -> Value {
    match route {
        Route::Chat => json!({ "user_message": "Which carrier covers Alaska?" }),
        Route::GenerateJson => json!({ "conversation_history": ["ship to", "Alaska"] }),
        Route::ProcessShipping => json!({
            "coverage_area": "AK",
            "carrier_attributes": ["tracking"],
            "weight_range_in_lbs": "1-5",
            "return_needed": true,
        }),
        Route::StateCoverageComparison
        | Route::CustomerSentimentComparison
        | Route::CarrierInteractiveComparison
        | Route::ShippingCostComparison => {
            json!({ "carriers": [{ "coverage_ranked_carrier": "UPS" }] })
        }
        Route::CarrierRateComparison => {
            json!({ "carriers": [{ "rate_ranked_carrier": "UPS" }], "years": 2 })
        }
    }
}

/// A body missing the route's required field(s).
pub fn invalid_body(route: Route) -> Value {
    match route {
        Route::Chat => json!({ "conversation_history": ["hello"] }),
        Route::GenerateJson => json!({ "user_message": "hello" }),
        Route::ProcessShipping => json!({
            "coverage_area": "AK",
            "carrier_attributes": ["tracking"],
            "weight_range_in_lbs": "1-5",
        }),
        Route::StateCoverageComparison
        | Route::CustomerSentimentComparison
        | Route::CarrierInteractiveComparison
        | Route::ShippingCostComparison
        | Route::CarrierRateComparison => json!({ "years": 4 }),
    }
}
