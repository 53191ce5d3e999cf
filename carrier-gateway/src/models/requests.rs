use crate::services::carrier_extractor::extract_ranked_carriers;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidationError, ValidationErrors};

/// Sent as `num_examples` on every shipping cost comparison.
pub const SHIPPING_COST_NUM_EXAMPLES: u32 = 5;

/// Sent as `years` on every carrier rate comparison, whatever the caller asked for.
pub const CARRIER_RATE_YEARS: u32 = 4;

/// An inbound body that can be checked and turned into an upstream body.
pub trait ForwardRequest: DeserializeOwned + Validate {
    /// Build the JSON body posted upstream. Only called after `validate`
    /// succeeded; an error here is an unexpected failure, not a client error.
    fn into_upstream(self) -> anyhow::Result<Value>;
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(required, length(min = 1))]
    pub user_message: Option<String>,
    /// Forwarded untouched.
    #[serde(default)]
    pub conversation_history: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChatUpstreamBody {
    user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_history: Option<Value>,
}

impl ForwardRequest for ChatRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        tracing::info!(
            conversation_history = ?self.conversation_history,
            "Received chat request"
        );

        let body = ChatUpstreamBody {
            user_message: self.user_message.context("user_message is required")?,
            conversation_history: self.conversation_history,
        };
        Ok(serde_json::to_value(body)?)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct JsonifyRequest {
    #[validate(required, length(min = 1))]
    pub conversation_history: Option<Vec<String>>,
}

impl ForwardRequest for JsonifyRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        let history = self
            .conversation_history
            .context("conversation_history is required")?
            .join(" ");
        Ok(json!({ "history": history }))
    }
}

/// Shipping requirements. Every field is opaque to the gateway and only has
/// to be present and truthy.
#[derive(Debug, Deserialize)]
pub struct ShippingRequest {
    #[serde(default)]
    pub coverage_area: Option<Value>,
    #[serde(default)]
    pub carrier_attributes: Option<Value>,
    #[serde(default)]
    pub weight_range_in_lbs: Option<Value>,
    #[serde(default)]
    pub return_needed: Option<Value>,
}

impl Validate for ShippingRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = [
            ("coverage_area", &self.coverage_area),
            ("carrier_attributes", &self.carrier_attributes),
            ("weight_range_in_lbs", &self.weight_range_in_lbs),
            ("return_needed", &self.return_needed),
        ];

        for (field, value) in fields {
            if !value.as_ref().is_some_and(is_truthy) {
                errors.add(field, ValidationError::new("required"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl ForwardRequest for ShippingRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        Ok(json!({
            "coverage_area": self.coverage_area,
            "carrier_attributes": self.carrier_attributes,
            "weight_range_in_lbs": self.weight_range_in_lbs,
            "return_needed": self.return_needed,
        }))
    }
}

/// `null`, `false`, `0` and `""` are treated as missing.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Ranked carrier records shared by the comparison routes.
#[derive(Debug, Deserialize, Validate)]
pub struct CarrierComparisonRequest {
    #[validate(required)]
    pub carriers: Option<Vec<Value>>,
}

impl CarrierComparisonRequest {
    fn ranked_carriers(self) -> anyhow::Result<Vec<Value>> {
        let carriers = self.carriers.context("carriers is required")?;
        Ok(extract_ranked_carriers(carriers)?)
    }
}

impl ForwardRequest for CarrierComparisonRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        Ok(json!({ "carriers": self.ranked_carriers()? }))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ShippingCostRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub comparison: CarrierComparisonRequest,
}

impl ForwardRequest for ShippingCostRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        Ok(json!({
            "carriers": self.comparison.ranked_carriers()?,
            "num_examples": SHIPPING_COST_NUM_EXAMPLES,
        }))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CarrierRateRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub comparison: CarrierComparisonRequest,
    /// Accepted from the caller but never forwarded; see [`CARRIER_RATE_YEARS`].
    #[serde(default)]
    pub years: Option<Value>,
}

impl ForwardRequest for CarrierRateRequest {
    fn into_upstream(self) -> anyhow::Result<Value> {
        if let Some(requested) = &self.years {
            tracing::debug!(
                requested_years = %requested,
                forwarded_years = CARRIER_RATE_YEARS,
                "Ignoring caller-supplied years"
            );
        }

        Ok(json!({
            "carriers": self.comparison.ranked_carriers()?,
            "years": CARRIER_RATE_YEARS,
        }))
    }
}
