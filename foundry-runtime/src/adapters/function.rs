//! HTTP function surface.
//!
//! Follows the function-host custom handler convention: the host forwards
//! each trigger as `POST /api/<function-name>` and relays our status and
//! body verbatim. Unlike the REST surface, a missing or malformed body is
//! not rejected; the handler runs on an empty object instead.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use foundry_common::{FailureBody, RequestPayload};
use serde_json::{json, Value};

use super::run_blocking;
use crate::dispatcher::Dispatcher;
use crate::error::Error;
use crate::state::AppState;

const JSON_MIMETYPE: &str = "application/json";

/// An inbound function trigger.
#[derive(Debug, Clone, Default)]
pub struct FunctionRequest {
    pub body: Option<Bytes>,
}

impl FunctionRequest {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Response handed back to the function host.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub body: String,
    pub mimetype: &'static str,
}

impl FunctionResponse {
    fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
            mimetype: JSON_MIMETYPE,
        }
    }

    /// 500 with `{error, status: "failed"}`.
    pub fn failure(err: &Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!(FailureBody::new(err.to_string())).to_string(),
            mimetype: JSON_MIMETYPE,
        }
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.mimetype)], self.body).into_response()
    }
}

pub struct FunctionAdapter;

impl FunctionAdapter {
    pub fn init() {
        tracing::info!("Initializing function adapter");
    }

    /// Handle one trigger. Never fails; errors become a 500 response.
    pub fn main(dispatcher: &Dispatcher, request: &FunctionRequest) -> FunctionResponse {
        tracing::info!("Processing function request");

        let payload = Self::parse_body(request.body.as_deref());
        let result = dispatcher
            .predict(RequestPayload::from(payload))
            .and_then(|result| {
                serde_json::to_string(&result).map_err(|e| Error::Internal(e.to_string()))
            });

        match result {
            Ok(body) => FunctionResponse::ok(body),
            Err(e) => {
                tracing::error!("Error in function adapter: {}", e);
                FunctionResponse::failure(&e)
            }
        }
    }

    /// Parse the body, falling back to `{}` when it is absent, null, or
    /// not valid JSON.
    fn parse_body(body: Option<&[u8]>) -> Value {
        match body.map(serde_json::from_slice::<Value>) {
            None | Some(Ok(Value::Null)) => json!({}),
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                tracing::warn!("Invalid JSON in request body, using empty object");
                json!({})
            }
        }
    }
}

/// Build the function router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/:function", post(trigger))
}

/// POST /api/:function - Function host trigger.
async fn trigger(
    State(state): State<Arc<AppState>>,
    Path(function): Path<String>,
    body: Bytes,
) -> FunctionResponse {
    tracing::debug!("Function trigger: {}", function);

    let request = FunctionRequest {
        body: (!body.is_empty()).then_some(body),
    };

    run_blocking(&state, move |dispatcher| {
        Ok(FunctionAdapter::main(dispatcher, &request))
    })
    .await
    .unwrap_or_else(|e| FunctionResponse::failure(&e))
}
