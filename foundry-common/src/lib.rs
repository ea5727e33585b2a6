//! Components Foundry Common Types
//!
//! Wire types shared by the runtime's invocation surfaces and by clients
//! talking to a deployed component.

pub mod action;
pub mod health;
pub mod payload;

pub use action::{ActionDescriptor, ActionOutcome, ActionRequest, ActionResponse, ActionSchema};
pub use health::{HealthState, HealthStatus};
pub use payload::{ErrorDetail, FailureBody, RequestPayload, ResultPayload};
