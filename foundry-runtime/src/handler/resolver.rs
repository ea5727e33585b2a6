//! Resolution of the configured handler reference.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use super::{Handler, HandlerError, HandlerReference, HandlerRegistry};

/// Why a handler reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The reference does not split into `<module>:<function>`.
    #[error("Invalid handler reference '{0}': expected '<module>:<function>'")]
    Configuration(String),

    #[error("No module named '{0}'")]
    Import(String),

    #[error("module '{module}' has no attribute '{function}'")]
    Attribute { module: String, function: String },
}

/// A handler looked up from the registry, with the names it was found under.
#[derive(Clone)]
pub struct ResolvedHandler {
    pub module: String,
    pub function: String,
    handler: Arc<dyn Handler>,
}

impl ResolvedHandler {
    pub fn invoke(&self, item: Value) -> Result<Value, HandlerError> {
        self.handler.invoke(item)
    }
}

impl std::fmt::Debug for ResolvedHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedHandler")
            .field("module", &self.module)
            .field("function", &self.function)
            .finish_non_exhaustive()
    }
}

/// Resolves one [`HandlerReference`] against a registry and keeps the
/// result for the lifetime of the resolver.
///
/// The first successful resolution is stored and never refreshed. Failures
/// are not stored, so every call on a broken reference reports the error
/// again. Concurrent first callers may both perform the lookup; only one
/// result is kept, and both are equivalent.
pub struct HandlerResolver {
    reference: HandlerReference,
    registry: Arc<HandlerRegistry>,
    resolved: OnceLock<ResolvedHandler>,
}

impl HandlerResolver {
    pub fn new(reference: HandlerReference, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            reference,
            registry,
            resolved: OnceLock::new(),
        }
    }

    pub fn reference(&self) -> &HandlerReference {
        &self.reference
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    pub fn resolve(&self) -> Result<&ResolvedHandler, ResolveError> {
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved);
        }

        let resolved = self.lookup().inspect_err(|e| {
            tracing::error!(
                available = %self.registry.references().join(", "),
                "Failed to load handler {}: {}",
                self.reference,
                e
            );
        })?;
        tracing::info!(
            "Successfully loaded function: {} from module: {}",
            resolved.function,
            resolved.module
        );

        Ok(self.resolved.get_or_init(|| resolved))
    }

    fn lookup(&self) -> Result<ResolvedHandler, ResolveError> {
        let (module_name, function_name) = self
            .reference
            .parts()
            .ok_or_else(|| ResolveError::Configuration(self.reference.to_string()))?;

        let module = self
            .registry
            .module(module_name)
            .ok_or_else(|| ResolveError::Import(module_name.to_string()))?;

        let handler = module
            .function(function_name)
            .ok_or_else(|| ResolveError::Attribute {
                module: module_name.to_string(),
                function: function_name.to_string(),
            })?;

        Ok(ResolvedHandler {
            module: module_name.to_string(),
            function: function_name.to_string(),
            handler,
        })
    }
}
