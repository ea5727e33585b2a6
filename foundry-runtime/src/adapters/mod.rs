//! Invocation surfaces.
//!
//! Each adapter translates one host's calling convention into
//! [`Dispatcher`] calls and converts [`Error`]s into that host's failure
//! shape. All of them are mounted on one axum router, gated by
//! [`SurfacesConfig`](crate::config::SurfacesConfig).

pub mod action;
pub mod function;
pub mod rest;
pub mod serving;

pub use action::ActionAdapter;
pub use function::{FunctionAdapter, FunctionRequest, FunctionResponse};
pub use rest::RestAdapter;
pub use serving::{ServingAdapter, ServingOutput};

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::dispatcher::Dispatcher;
use crate::error::{Error, Result};
use crate::logging;
use crate::state::AppState;

/// Build the router for every enabled surface.
pub fn router(state: Arc<AppState>) -> Router {
    let surfaces = &state.config.surfaces;
    let mut router = Router::new();

    if surfaces.rest {
        RestAdapter::init();
        router = router.merge(rest::router());
    }
    if surfaces.function {
        FunctionAdapter::init();
        router = router.merge(function::router());
    }
    if surfaces.serving {
        ServingAdapter::init();
        router = router.merge(serving::router());
    }
    if surfaces.actions {
        ActionAdapter::init();
        router = router.merge(action::router());
    }

    // Bodies of any size reach the adapters, which own their error envelopes.
    router
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging::request_logger,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run `f` against the dispatcher on the blocking thread pool.
///
/// Handlers are synchronous and may be slow; a panicking handler surfaces
/// as [`Error::Internal`].
pub(crate) async fn run_blocking<T, F>(state: &Arc<AppState>, f: F) -> Result<T>
where
    F: FnOnce(&Dispatcher) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.dispatcher))
        .await
        .map_err(|e| Error::Internal(e.to_string()))?
}

pub(crate) fn parse_json(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(Error::InvalidJson)
}
