//! REST / container surface: `/health`, `/predict`, `/batch`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use foundry_common::{HealthStatus, RequestPayload, ResultPayload};
use serde_json::Value;

use super::{parse_json, run_blocking};
use crate::error::{Error, Result};
use crate::state::AppState;

pub struct RestAdapter;

impl RestAdapter {
    pub fn init() {
        tracing::info!("Initializing REST adapter");
    }
}

/// Build the REST router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/batch", post(batch))
}

/// GET /health - Handler resolution status. Always 200.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let status = state.dispatcher.health_check();
    if !status.status.is_healthy() {
        tracing::warn!("Health check: handler {} is {}", status.handler, status.status);
    }
    Json(status)
}

/// POST /predict - Run the handler on any JSON value.
async fn predict(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<ResultPayload>> {
    let payload = parse_json(&body).inspect_err(log_error)?;

    let result = run_blocking(&state, move |dispatcher| {
        dispatcher.predict(RequestPayload::from(payload))
    })
    .await
    .inspect_err(log_error)?;

    Ok(Json(result))
}

/// POST /batch - Run the handler on each element of a JSON array.
async fn batch(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Json<ResultPayload>> {
    let Value::Array(items) = parse_json(&body).inspect_err(log_error)? else {
        tracing::error!("Batch endpoint requires array input");
        return Err(Error::BatchRequiresArray);
    };

    let result = run_blocking(&state, move |dispatcher| {
        dispatcher.predict(RequestPayload::Batch(items))
    })
    .await
    .inspect_err(log_error)?;

    Ok(Json(result))
}

fn log_error(e: &Error) {
    tracing::error!("Error in prediction: {}", e);
}
