//! The validate → transform → forward → relay pipeline every route runs.

use crate::models::requests::ForwardRequest;
use crate::models::route::Route;
use crate::services::upstream_client::UpstreamError;
use crate::AppState;
use axum::{
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;
use service_core::observability::extract_request_id;

pub async fn forward<T: ForwardRequest>(
    state: &AppState,
    route: Route,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<Value>, AppError> {
    let request: T = parse(route, headers, body)?;

    let payload = request.into_upstream().map_err(|e| {
        tracing::error!(route = %route, error = ?e, "Failed to build upstream payload");
        AppError::InternalError(route.failure_message().to_string())
    })?;

    let request_id = extract_request_id(headers);

    match state
        .upstream
        .forward(route, &payload, request_id.as_deref())
        .await
    {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            tracing::error!(route = %route, error = %e, "Upstream call failed");
            Err(normalize(route, e))
        }
    }
}

/// Decode and validate the body. Any failure is the route's 400.
///
/// Bodies not labelled as JSON are treated as empty, so they can only fail
/// validation.
fn parse<T: ForwardRequest>(
    route: Route,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<T, AppError> {
    let bad_request = || AppError::BadRequest(route.validation_message().to_string());

    if !has_json_content_type(headers) {
        tracing::warn!(
            route = %route,
            content_type = ?headers.get(CONTENT_TYPE),
            "Rejected request body without a JSON content type"
        );
        return Err(bad_request());
    }

    let request: T = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(route = %route, error = %e, "Rejected undecodable request body");
        bad_request()
    })?;

    request.validate().map_err(|e| {
        tracing::warn!(route = %route, error = %e, "Rejected invalid request body");
        bad_request()
    })?;

    Ok(request)
}

/// `application/json` or a `+json` suffix type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Map an upstream failure to what the caller sees.
pub fn normalize(route: Route, error: UpstreamError) -> AppError {
    match error {
        UpstreamError::Status { status, body, .. } if route.relays_upstream_errors() => {
            AppError::Upstream { status, body }
        }
        _ => AppError::InternalError(route.failure_message().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requests::{ChatRequest, JsonifyRequest};
    use axum::http::StatusCode;
    use serde_json::json;

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());
        headers
    }

    #[test]
    fn empty_body_is_a_bad_request() {
        let err = parse::<ChatRequest>(Route::Chat, &json_headers(), b"").unwrap_err();

        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Missing required parameters"));
    }

    #[test]
    fn wrong_shape_is_a_bad_request() {
        let err = parse::<JsonifyRequest>(
            Route::GenerateJson,
            &json_headers(),
            br#"{"conversation_history": "not a list"}"#,
        )
        .unwrap_err();

        assert!(
            matches!(err, AppError::BadRequest(msg) if msg == "Invalid or missing conversation history")
        );
    }

    #[test]
    fn json_body_without_json_content_type_is_a_bad_request() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());

        let err = parse::<ChatRequest>(Route::Chat, &headers, br#"{"user_message": "hi"}"#)
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg == "Missing required parameters"));

        let err = parse::<ChatRequest>(
            Route::Chat,
            &HeaderMap::new(),
            br#"{"user_message": "hi"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn json_content_type_variants_are_accepted() {
        for value in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "application/vnd.api+json",
        ] {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, value.parse().unwrap());
            assert!(has_json_content_type(&headers), "{value}");
        }
    }

    #[test]
    fn chat_relays_upstream_status() {
        let err = UpstreamError::Status {
            url: "http://chat/chat/".into(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({ "error": "x" }),
        };

        match normalize(Route::Chat, err) {
            AppError::Upstream { status, body } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, json!({ "error": "x" }));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_routes_hide_upstream_status() {
        let err = UpstreamError::Status {
            url: "http://shipping/process-shipping/".into(),
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({ "error": "x" }),
        };

        assert!(matches!(
            normalize(Route::ProcessShipping, err),
            AppError::InternalError(msg)
                if msg == "An error occurred while processing the shipping request"
        ));
    }
}
