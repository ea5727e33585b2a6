//! Action protocol messages.
//!
//! Clients address a component by action name rather than by route:
//!
//! ```json
//! {"action": "predict", "params": {"text": "hello world"}}
//! ```
//!
//! and receive an envelope echoing the action:
//!
//! ```json
//! {"success": true, "result": {"word_count": 2}, "action": "predict"}
//! {"success": false, "error": "Unknown action: train", "action": "train"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// An inbound action invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default = "default_params")]
    pub params: Value,
}

fn default_action() -> String {
    "predict".to_string()
}

fn default_params() -> Value {
    json!({})
}

impl ActionRequest {
    /// Build a request from a decoded JSON document, leniently.
    ///
    /// Missing fields take their defaults and a non-string `action` is kept
    /// as its JSON text, so it is reported as an unknown action rather than
    /// a decoding failure. Returns `None` if `value` is not an object.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let action = match fields.remove("action") {
            None => default_action(),
            Some(Value::String(name)) => name,
            Some(other) => other.to_string(),
        };
        let params = fields.remove("params").unwrap_or_else(default_params);

        Some(Self { action, params })
    }
}

impl Default for ActionRequest {
    fn default() -> Self {
        Self {
            action: default_action(),
            params: default_params(),
        }
    }
}

/// Either the handler's result or the failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionOutcome {
    Result { result: Value },
    Error { error: String },
}

/// Response envelope for an action invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: ActionOutcome,
    pub action: String,
}

impl ActionResponse {
    pub fn success(action: impl Into<String>, result: Value) -> Self {
        Self {
            success: true,
            outcome: ActionOutcome::Result { result },
            action: action.into(),
        }
    }

    pub fn failure(action: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            outcome: ActionOutcome::Error {
                error: error.into(),
            },
            action: action.into(),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            ActionOutcome::Result { result } => Some(result),
            ActionOutcome::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ActionOutcome::Error { error } => Some(error),
            ActionOutcome::Result { .. } => None,
        }
    }
}

/// Catalog entry describing an advertised action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub name: String,
    pub description: String,
    /// Loose JSON-schema-like description of `params`. Not enforced.
    pub parameters: Value,
}

/// Self-description of an action server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSchema {
    pub name: String,
    pub version: String,
    pub description: String,
    pub actions: Vec<ActionDescriptor>,
}
