//! Batch / online serving surface.
//!
//! Mirrors the scoring-script contract of managed ML endpoints: `init()`
//! once per worker, then `run(data)` per request, where `data` is one
//! record for an online call or a list of records for a batch job. `run`
//! never fails; errors are returned as `{error, status: "failed"}`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use foundry_common::{FailureBody, RequestPayload, ResultPayload};
use serde::Serialize;
use serde_json::Value;

use super::{parse_json, run_blocking};
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::state::AppState;

/// What `run` hands back to the serving host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServingOutput {
    Result(ResultPayload),
    Failed(FailureBody),
}

impl ServingOutput {
    pub fn failed(err: &Error) -> Self {
        ServingOutput::Failed(FailureBody::new(err.to_string()))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ServingOutput::Failed(_))
    }
}

pub struct ServingAdapter;

impl ServingAdapter {
    pub fn init() {
        tracing::info!("Initializing serving adapter");
    }

    pub fn run(dispatcher: &Dispatcher, data: Value) -> ServingOutput {
        let payload = RequestPayload::from(data);
        if payload.is_batch() {
            tracing::info!("Processing batch request with {} items", payload.item_count());
        } else {
            tracing::info!("Processing online request");
        }

        match dispatcher.predict(payload) {
            Ok(result) => ServingOutput::Result(result),
            Err(e) => {
                tracing::error!("Error in serving adapter: {}", e);
                ServingOutput::failed(&e)
            }
        }
    }
}

/// Build the serving router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/score", post(score))
}

/// POST /score - Online scoring. Always 200; failures are in the body.
async fn score(State(state): State<Arc<AppState>>, body: Bytes) -> Json<ServingOutput> {
    let data = match parse_json(&body) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("Error in serving adapter: {}", e);
            return Json(ServingOutput::failed(&e));
        }
    };

    let output = run_blocking(&state, move |dispatcher| {
        Ok(ServingAdapter::run(dispatcher, data))
    })
    .await
    .unwrap_or_else(|e| ServingOutput::failed(&e));

    Json(output)
}
