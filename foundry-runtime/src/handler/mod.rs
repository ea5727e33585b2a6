//! Handler abstraction layer.
//!
//! A handler is the single user-supplied computation the runtime exposes.
//! Handlers are registered up front in a [`HandlerRegistry`] under a
//! `<module-path>:<function-name>` identifier, and the configured
//! [`HandlerReference`] picks exactly one of them at startup.

mod registry;
mod resolver;

pub use registry::{HandlerModule, HandlerRegistry};
pub use resolver::{HandlerResolver, ResolveError, ResolvedHandler};

use serde_json::Value;

/// Error raised by a handler while processing one item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A synchronous computation over one request item.
pub trait Handler: Send + Sync {
    fn invoke(&self, item: Value) -> Result<Value, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(Value) -> Result<Value, HandlerError> + Send + Sync,
{
    fn invoke(&self, item: Value) -> Result<Value, HandlerError> {
        self(item)
    }
}

/// A configured `<module-path>:<function-name>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerReference(String);

impl HandlerReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into `(module, function)` on the first `:`.
    ///
    /// Returns `None` for a malformed reference: no colon, an empty half,
    /// or a second colon in the function half.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let (module, function) = self.0.split_once(':')?;
        if module.is_empty() || function.is_empty() || function.contains(':') {
            return None;
        }
        Some((module, function))
    }

    pub fn is_malformed(&self) -> bool {
        self.parts().is_none()
    }
}

impl std::fmt::Display for HandlerReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerReference {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}
