use crate::models::route::Route;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub upstreams: UpstreamSettings,
}

/// Base URLs of the upstream services, one per route.
///
/// Overridable per key, e.g. `APP__UPSTREAMS__CHAT_URL`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub chat_url: String,
    pub jsonify_url: String,
    pub shipping_url: String,
    pub state_coverage_url: String,
    pub customer_sentiment_url: String,
    pub carrier_interactive_url: String,
    pub shipping_cost_url: String,
    pub carrier_rate_url: String,
    /// Per-request deadline for upstream calls. No deadline when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            chat_url: "https://orchestrochatapi.onrender.com".to_string(),
            jsonify_url: "https://jsonifyagentapi.onrender.com".to_string(),
            shipping_url: "https://orchestraai.onrender.com".to_string(),
            state_coverage_url: "https://statecoverageapi.onrender.com".to_string(),
            customer_sentiment_url: "https://customersentimentapi.onrender.com".to_string(),
            carrier_interactive_url: "https://carrierinteractiveapi.onrender.com".to_string(),
            shipping_cost_url: "https://shippingcostapi.onrender.com".to_string(),
            carrier_rate_url: "https://carrierrateapi.onrender.com".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamSettings {
    /// Every route pointed at the same base URL. Handy for tests against a
    /// single mock server.
    pub fn all(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            chat_url: base_url.clone(),
            jsonify_url: base_url.clone(),
            shipping_url: base_url.clone(),
            state_coverage_url: base_url.clone(),
            customer_sentiment_url: base_url.clone(),
            carrier_interactive_url: base_url.clone(),
            shipping_cost_url: base_url.clone(),
            carrier_rate_url: base_url,
            timeout_secs: None,
        }
    }

    pub fn base_url(&self, route: Route) -> &str {
        match route {
            Route::Chat => &self.chat_url,
            Route::GenerateJson => &self.jsonify_url,
            Route::ProcessShipping => &self.shipping_url,
            Route::StateCoverageComparison => &self.state_coverage_url,
            Route::CustomerSentimentComparison => &self.customer_sentiment_url,
            Route::CarrierInteractiveComparison => &self.carrier_interactive_url,
            Route::ShippingCostComparison => &self.shipping_cost_url,
            Route::CarrierRateComparison => &self.carrier_rate_url,
        }
    }

    /// Full upstream URL for `route`, tolerating a trailing slash on the base.
    pub fn endpoint(&self, route: Route) -> String {
        format!(
            "{}{}",
            self.base_url(route).trim_end_matches('/'),
            route.upstream_path()
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let settings = core_config::layered(Some(&configuration_file()))?;

        let common = core_config::Config::from_settings(&settings)?;
        let upstreams = match settings.get::<UpstreamSettings>("upstreams") {
            Ok(upstreams) => upstreams,
            Err(config::ConfigError::NotFound(_)) => UpstreamSettings::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { common, upstreams })
    }
}

fn configuration_file() -> PathBuf {
    let base_path = std::env::current_dir().unwrap_or_default();

    // Works from both the workspace root and the crate directory.
    let configuration_directory = if base_path.ends_with("carrier-gateway") {
        base_path.join("config")
    } else {
        base_path.join("carrier-gateway").join("config")
    };

    configuration_directory.join("base.yaml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_every_route_its_own_service() {
        let settings = UpstreamSettings::default();
        let mut urls: Vec<_> = Route::ALL.iter().map(|r| settings.base_url(*r)).collect();
        urls.sort();
        urls.dedup();

        assert_eq!(urls.len(), Route::ALL.len());
        assert!(settings.timeout().is_none());
    }

    #[test]
    fn endpoint_joins_base_and_subpath() {
        let settings = UpstreamSettings::all("http://localhost:9000/");

        assert_eq!(
            settings.endpoint(Route::GenerateJson),
            "http://localhost:9000/jsonify-agent/"
        );
        assert_eq!(settings.endpoint(Route::Chat), "http://localhost:9000/chat/");
    }

    #[test]
    fn partial_upstream_section_keeps_remaining_defaults() {
        let settings = config::Config::builder()
            .set_override("upstreams.chat_url", "http://chat.internal")
            .unwrap()
            .set_override("upstreams.timeout_secs", 30)
            .unwrap()
            .build()
            .unwrap();

        let upstreams: UpstreamSettings = settings.get("upstreams").unwrap();

        assert_eq!(upstreams.chat_url, "http://chat.internal");
        assert_eq!(
            upstreams.jsonify_url,
            UpstreamSettings::default().jsonify_url
        );
        assert_eq!(upstreams.timeout(), Some(Duration::from_secs(30)));
    }
}
