use crate::config::UpstreamSettings;
use crate::models::route::Route;
use metrics::{counter, histogram};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use service_core::observability::TracedClientExt;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered, but not with a 2xx.
    #[error("{url} responded with {status}")]
    Status {
        url: String,
        status: StatusCode,
        body: Value,
    },

    /// No usable response: connect/DNS failure, timeout, or the body could
    /// not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    fn outcome(&self) -> &'static str {
        match self {
            UpstreamError::Status { .. } => "status",
            UpstreamError::Transport { .. } => "transport",
        }
    }
}

/// Posts route payloads to their upstream service.
///
/// One `reqwest::Client` (and so one connection pool) is shared by every
/// route. Calls are never retried.
pub struct UpstreamClient {
    client: Client,
    settings: UpstreamSettings,
}

impl UpstreamClient {
    pub fn new(settings: UpstreamSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// POST `body` to the route's upstream and return the decoded reply body.
    ///
    /// A reply that is not valid JSON is returned as a JSON string.
    pub async fn forward(
        &self,
        route: Route,
        body: &Value,
        request_id: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let url = self.settings.endpoint(route);
        let start = Instant::now();

        let result = self.post(&url, body, request_id).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.outcome(),
        };
        counter!(
            "upstream_requests_total",
            "route" => route.path(),
            "outcome" => outcome
        )
        .increment(1);
        histogram!("upstream_request_duration_seconds", "route" => route.path())
            .record(start.elapsed().as_secs_f64());

        result
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        request_id: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let transport = |source: reqwest::Error| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .traced_post(url)
            .json(body)
            .timeout(self.settings.timeout())
            .send(request_id)
            .await
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        let body = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| Value::String(text));

        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        tracing::debug!(url = %url, status = %status, "Upstream call succeeded");
        Ok(body)
    }
}
