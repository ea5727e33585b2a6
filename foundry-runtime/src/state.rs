//! Shared application state.

use std::sync::Arc;

use crate::components;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::handler::{HandlerReference, HandlerRegistry, HandlerResolver};

/// Shared application state passed to all surfaces.
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    /// Build state serving `config.handler.reference` out of `registry`.
    pub fn with_registry(config: Config, registry: Arc<HandlerRegistry>) -> Self {
        let reference = HandlerReference::new(config.handler.reference.clone());
        let resolver = HandlerResolver::new(reference, registry);
        let dispatcher = Dispatcher::new(resolver, crate::VERSION);
        Self::new(config, dispatcher)
    }

    /// Build state over the built-in component registry.
    pub fn from_config(config: Config) -> Self {
        let registry = Arc::new(components::builtin_registry(&config.components));
        Self::with_registry(config, registry)
    }
}
