use super::forward::forward;
use crate::models::requests::{
    CarrierComparisonRequest, CarrierRateRequest, ShippingCostRequest, ShippingRequest,
};
use crate::models::route::Route;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;
use service_core::error::AppError;

pub async fn process_shipping_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<ShippingRequest>(&state, Route::ProcessShipping, &headers, &body).await
}

pub async fn state_coverage_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<CarrierComparisonRequest>(&state, Route::StateCoverageComparison, &headers, &body)
        .await
}

pub async fn customer_sentiment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<CarrierComparisonRequest>(
        &state,
        Route::CustomerSentimentComparison,
        &headers,
        &body,
    )
    .await
}

pub async fn carrier_interactive_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<CarrierComparisonRequest>(
        &state,
        Route::CarrierInteractiveComparison,
        &headers,
        &body,
    )
    .await
}

pub async fn shipping_cost_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<ShippingCostRequest>(&state, Route::ShippingCostComparison, &headers, &body).await
}

pub async fn carrier_rate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<CarrierRateRequest>(&state, Route::CarrierRateComparison, &headers, &body).await
}
