//! Request and result payload shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A prediction request, either one item or an ordered batch of items.
///
/// Batch membership is structural: a top-level JSON array is a batch,
/// anything else (object, string, number, null) is a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestPayload {
    Batch(Vec<Value>),
    Single(Value),
}

impl RequestPayload {
    pub fn is_batch(&self) -> bool {
        matches!(self, RequestPayload::Batch(_))
    }

    /// Number of items the handler will be invoked with.
    pub fn item_count(&self) -> usize {
        match self {
            RequestPayload::Batch(items) => items.len(),
            RequestPayload::Single(_) => 1,
        }
    }
}

impl From<Value> for RequestPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => RequestPayload::Batch(items),
            other => RequestPayload::Single(other),
        }
    }
}

/// Prediction output, mirroring the shape of the [`RequestPayload`] it
/// was produced from. Batch results keep input order and length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Batch(Vec<Value>),
    Single(Value),
}

impl ResultPayload {
    pub fn into_value(self) -> Value {
        match self {
            ResultPayload::Batch(items) => Value::Array(items),
            ResultPayload::Single(value) => value,
        }
    }
}

impl From<ResultPayload> for Value {
    fn from(payload: ResultPayload) -> Self {
        payload.into_value()
    }
}

/// Failure envelope used by the serving and function surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureBody {
    pub error: String,
    pub status: String,
}

impl FailureBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: "failed".to_string(),
        }
    }
}

/// Error body returned by the REST surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_array_is_batch() {
        let payload = RequestPayload::from(json!([{"text": "a"}, "b"]));
        assert!(payload.is_batch());
        assert_eq!(payload.item_count(), 2);
    }

    #[test]
    fn test_non_array_is_single() {
        for value in [json!({"text": "a"}), json!("plain"), json!(3), Value::Null] {
            let payload = RequestPayload::from(value.clone());
            assert_eq!(payload.item_count(), 1);
            assert_eq!(payload, RequestPayload::Single(value));
        }
    }

    #[test]
    fn test_empty_array_is_empty_batch() {
        let payload = RequestPayload::from(json!([]));
        assert!(payload.is_batch());
        assert_eq!(payload.item_count(), 0);
    }

    #[test]
    fn test_result_payload_serializes_without_tag() {
        let batch = ResultPayload::Batch(vec![json!({"n": 1}), json!({"n": 2})]);
        assert_eq!(serde_json::to_value(&batch).unwrap(), json!([{"n": 1}, {"n": 2}]));

        let single = ResultPayload::Single(json!({"n": 1}));
        assert_eq!(single.into_value(), json!({"n": 1}));
    }

    #[test]
    fn test_failure_body() {
        let body = FailureBody::new("boom");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "boom", "status": "failed"})
        );
    }
}
