//! The single prediction entry point every surface calls into.

use foundry_common::{HealthState, HealthStatus, RequestPayload, ResultPayload};

use crate::error::Result;
use crate::handler::{HandlerResolver, ResolvedHandler};

/// Normalizes request shape and invokes the resolved handler.
///
/// Errors from resolution or from the handler are returned as-is; turning
/// them into a response is the caller's job.
pub struct Dispatcher {
    resolver: HandlerResolver,
    version: String,
}

impl Dispatcher {
    pub fn new(resolver: HandlerResolver, version: impl Into<String>) -> Self {
        Self {
            resolver,
            version: version.into(),
        }
    }

    pub fn resolver(&self) -> &HandlerResolver {
        &self.resolver
    }

    /// Resolve the handler ahead of the first request.
    pub fn warm_up(&self) -> Result<&ResolvedHandler> {
        Ok(self.resolver.resolve()?)
    }

    /// Run the handler once for a single item, or once per item in order
    /// for a batch. The first failing batch item aborts the batch.
    pub fn predict(&self, payload: RequestPayload) -> Result<ResultPayload> {
        let handler = self.resolver.resolve()?;

        match payload {
            RequestPayload::Batch(items) => {
                tracing::info!("Processing batch of {} items", items.len());
                let mut results = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let result = handler.invoke(item).inspect_err(|e| {
                        tracing::error!("Handler failed on batch item {}: {}", index, e);
                    })?;
                    results.push(result);
                }
                Ok(ResultPayload::Batch(results))
            }
            RequestPayload::Single(item) => {
                tracing::info!("Processing single item");
                let result = handler.invoke(item).inspect_err(|e| {
                    tracing::error!("Handler failed: {}", e);
                })?;
                Ok(ResultPayload::Single(result))
            }
        }
    }

    /// Report whether the handler resolves. Never fails.
    ///
    /// `module` and `function` come from splitting the reference, whether
    /// or not resolution succeeded.
    pub fn health_check(&self) -> HealthStatus {
        let status = match self.resolver.resolve() {
            Ok(_) => HealthState::Healthy,
            Err(_) => HealthState::Unhealthy,
        };

        let reference = self.resolver.reference();
        let (module, function) = reference.parts().unwrap_or(("unknown", "unknown"));

        HealthStatus {
            status,
            handler: reference.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            version: self.version.clone(),
        }
    }
}
