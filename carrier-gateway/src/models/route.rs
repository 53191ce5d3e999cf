/// Every forwarding endpoint the gateway exposes.
///
/// A route fixes its inbound path, the upstream subpath it posts to, and the
/// two caller-facing error messages. Which upstream base URL it uses comes
/// from [`UpstreamSettings`](crate::config::UpstreamSettings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Chat,
    GenerateJson,
    ProcessShipping,
    StateCoverageComparison,
    CustomerSentimentComparison,
    CarrierInteractiveComparison,
    ShippingCostComparison,
    CarrierRateComparison,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Chat,
        Route::GenerateJson,
        Route::ProcessShipping,
        Route::StateCoverageComparison,
        Route::CustomerSentimentComparison,
        Route::CarrierInteractiveComparison,
        Route::ShippingCostComparison,
        Route::CarrierRateComparison,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Chat => "/chat",
            Route::GenerateJson => "/generate-json",
            Route::ProcessShipping => "/process-shipping",
            Route::StateCoverageComparison => "/state-coverage-comparison",
            Route::CustomerSentimentComparison => "/customer-sentiment-comparison",
            Route::CarrierInteractiveComparison => "/carrier-interactive-comparison",
            Route::ShippingCostComparison => "/shipping-cost-comparison",
            Route::CarrierRateComparison => "/carrier-rate-comparison",
        }
    }

    /// Path appended to the upstream base URL. The trailing slash is required
    /// by the upstream services.
    pub fn upstream_path(self) -> &'static str {
        match self {
            Route::Chat => "/chat/",
            Route::GenerateJson => "/jsonify-agent/",
            Route::ProcessShipping => "/process-shipping/",
            Route::StateCoverageComparison => "/state-coverage-comparison/",
            Route::CustomerSentimentComparison => "/customer-sentiment-comparison/",
            Route::CarrierInteractiveComparison => "/carrier-interactive-comparison/",
            Route::ShippingCostComparison => "/shipping-cost-comparison/",
            Route::CarrierRateComparison => "/carrier-rate-comparison/",
        }
    }

    pub fn validation_message(self) -> &'static str {
        match self {
            Route::Chat => "Missing required parameters",
            Route::GenerateJson => "Invalid or missing conversation history",
            Route::ProcessShipping => "Missing required shipping parameters",
            Route::StateCoverageComparison
            | Route::CustomerSentimentComparison
            | Route::CarrierInteractiveComparison
            | Route::ShippingCostComparison
            | Route::CarrierRateComparison => "Invalid or missing carriers",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Route::Chat => "An error occurred while processing your request",
            Route::GenerateJson => "An error occurred while generating the JSON structure",
            Route::ProcessShipping => "An error occurred while processing the shipping request",
            Route::StateCoverageComparison => "An error occurred while comparing state coverage",
            Route::CustomerSentimentComparison => {
                "An error occurred while comparing customer sentiment"
            }
            Route::CarrierInteractiveComparison => {
                "An error occurred while running the interactive carrier comparison"
            }
            Route::ShippingCostComparison => "An error occurred while comparing shipping costs",
            Route::CarrierRateComparison => "An error occurred while comparing carrier rates",
        }
    }

    /// Only the chat route hands a failing upstream's status and body back to
    /// the caller. Every other route answers with its generic 500.
    pub fn relays_upstream_errors(self) -> bool {
        matches!(self, Route::Chat)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
