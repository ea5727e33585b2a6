//! Components Foundry runtime.
//!
//! Resolves one configured handler out of a [`HandlerRegistry`] and exposes
//! it through four invocation surfaces: REST, HTTP function, batch/online
//! serving and action-RPC. Every surface goes through the same
//! [`Dispatcher`].

pub mod adapters;
pub mod components;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod logging;
pub mod state;

pub use crate::config::Config;
pub use dispatcher::Dispatcher;
pub use error::{Error, ErrorKind, Result};
pub use handler::{
    Handler, HandlerError, HandlerModule, HandlerReference, HandlerRegistry, HandlerResolver,
    ResolveError, ResolvedHandler,
};
pub use state::AppState;

/// Runtime version reported by `/health` and the action schema.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
