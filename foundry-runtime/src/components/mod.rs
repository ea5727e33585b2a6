//! Built-in components.
//!
//! These are registered in the default registry so a freshly deployed
//! runtime has something to serve; real deployments register their own
//! handlers alongside or instead of them.

mod text_processor;
mod word_count;

pub use text_processor::TextProcessor;

use serde_json::Value;

use crate::config::ComponentsConfig;
use crate::handler::{HandlerError, HandlerModule, HandlerRegistry};

/// Registry containing every built-in component:
///
/// - `components.word_count:predict`
/// - `components.text_processor:run`
pub fn builtin_registry(config: &ComponentsConfig) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(
        HandlerModule::new("components.word_count").with_function("predict", word_count::predict),
    );
    registry.register(
        HandlerModule::new("components.text_processor")
            .with_function("run", TextProcessor::from_config(&config.text_processor)),
    );
    registry
}

/// Read an optional string field, defaulting to "".
fn text_field<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
) -> Result<&'a str, HandlerError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(""),
        Some(Value::String(text)) => Ok(text.as_str()),
        Some(_) => Err(HandlerError::new(format!("'{}' must be a string", key))),
    }
}
