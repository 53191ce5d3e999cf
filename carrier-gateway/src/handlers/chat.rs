use super::forward::forward;
use crate::models::requests::{ChatRequest, JsonifyRequest};
use crate::models::route::Route;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use serde_json::Value;
use service_core::error::AppError;

pub async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<ChatRequest>(&state, Route::Chat, &headers, &body).await
}

pub async fn generate_json_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    forward::<JsonifyRequest>(&state, Route::GenerateJson, &headers, &body).await
}
