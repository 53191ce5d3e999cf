//! Flattens ranked carrier records into the list the comparison upstreams
//! expect.
//!
//! Callers send records such as `{"cost_ranked_carrier": {...}}`; each
//! comparison upstream only wants the value under that `*_ranked_carrier` key.

use serde_json::{Map, Value};
use thiserror::Error;

pub const RANKED_CARRIER_SUFFIX: &str = "_ranked_carrier";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("carrier entry at index {index} is not an object")]
    NotAnObject { index: usize },
}

/// Replace each record with the value of its first `*_ranked_carrier` key.
///
/// Output has the same length and order as the input. A record without such
/// a key yields `null` in its slot. Key order is the record's own order as
/// received.
pub fn extract_ranked_carriers(carriers: Vec<Value>) -> Result<Vec<Value>, ExtractError> {
    carriers
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(record) => Ok(ranked_carrier(record).unwrap_or(Value::Null)),
            _ => Err(ExtractError::NotAnObject { index }),
        })
        .collect()
}

fn ranked_carrier(record: Map<String, Value>) -> Option<Value> {
    record
        .into_iter()
        .find(|(key, _)| key.ends_with(RANKED_CARRIER_SUFFIX))
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn carriers(value: Value) -> Vec<Value> {
        match value {
            Value::Array(items) => items,
            other => panic!("expected array, got {other}"),
        }
    }

    #[test]
    fn extracts_one_value_per_record() {
        let input = carriers(json!([
            { "cost_ranked_carrier": "UPS" },
            { "coverage_ranked_carrier": { "name": "USPS", "score": 0.8 } },
        ]));

        assert_eq!(
            extract_ranked_carriers(input).unwrap(),
            vec![json!("UPS"), json!({ "name": "USPS", "score": 0.8 })]
        );
    }

    #[test]
    fn record_without_ranked_key_yields_null() {
        let input = carriers(json!([{ "a_ranked_carrier": "FedEx" }, { "foo": "bar" }]));

        assert_eq!(
            extract_ranked_carriers(input).unwrap(),
            vec![json!("FedEx"), Value::Null]
        );
    }

    #[test]
    fn first_matching_key_in_record_order_wins() {
        let input: Vec<Value> = serde_json::from_str(
            r#"[{ "rank": 1, "z_ranked_carrier": "DHL", "a_ranked_carrier": "UPS" }]"#,
        )
        .unwrap();

        assert_eq!(extract_ranked_carriers(input).unwrap(), vec![json!("DHL")]);
    }

    #[test]
    fn suffix_must_end_the_key() {
        let input = carriers(json!([{ "_ranked_carrier_name": "UPS" }]));

        assert_eq!(extract_ranked_carriers(input).unwrap(), vec![Value::Null]);
    }

    #[test]
    fn empty_list_stays_empty() {
        assert!(extract_ranked_carriers(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn non_object_entry_is_rejected() {
        let input = carriers(json!([{ "x_ranked_carrier": "UPS" }, "FedEx"]));

        assert_eq!(
            extract_ranked_carriers(input),
            Err(ExtractError::NotAnObject { index: 1 })
        );
    }
}
