//! Action-RPC surface.
//!
//! Requests name an action and carry its params. `predict`, `process` and
//! `execute` are aliases for the same call; anything else is rejected
//! without touching the handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use foundry_common::{ActionDescriptor, ActionRequest, ActionResponse, ActionSchema, RequestPayload};
use serde_json::{json, Value};

use super::{parse_json, run_blocking};
use crate::dispatcher::Dispatcher;
use crate::error::{Error, Result};
use crate::state::AppState;

/// Action names routed to the handler.
pub const ACTIONS: [&str; 3] = ["predict", "process", "execute"];

const SERVER_NAME: &str = "component-server";
const SERVER_DESCRIPTION: &str = "Components Foundry action server";

pub struct ActionAdapter;

impl ActionAdapter {
    pub fn init() {
        tracing::info!("Initializing action adapter");
    }

    /// Invoke `action_name`. Never fails; errors are reported in the envelope.
    ///
    /// `params` is passed to the handler as-is; the catalog from
    /// [`list_actions`](Self::list_actions) is not used to validate it.
    pub fn handle_action(
        dispatcher: &Dispatcher,
        action_name: &str,
        params: Value,
    ) -> ActionResponse {
        tracing::info!("Processing action: {}", action_name);

        match Self::dispatch(dispatcher, action_name, params) {
            Ok(result) => ActionResponse::success(action_name, result),
            Err(e) => Self::failure(action_name, &e),
        }
    }

    /// Invoke the action described by a full request envelope.
    pub fn handle_request(dispatcher: &Dispatcher, request: ActionRequest) -> ActionResponse {
        Self::handle_action(dispatcher, &request.action, request.params)
    }

    pub fn failure(action_name: &str, err: &Error) -> ActionResponse {
        match err {
            Error::UnknownAction(_) => tracing::warn!("{}", err),
            _ => tracing::error!("Error in action {}: {}", action_name, err),
        }
        ActionResponse::failure(action_name, err.to_string())
    }

    fn dispatch(dispatcher: &Dispatcher, action_name: &str, params: Value) -> Result<Value> {
        if !ACTIONS.contains(&action_name) {
            return Err(Error::UnknownAction(action_name.to_string()));
        }
        Ok(dispatcher.predict(RequestPayload::from(params))?.into_value())
    }

    /// Advertised actions. Informational only.
    pub fn list_actions() -> Vec<ActionDescriptor> {
        vec![
            ActionDescriptor {
                name: "predict".to_string(),
                description: "Execute the component's prediction function".to_string(),
                parameters: json!({
                    "type": "object",
                    "description": "Input data for prediction"
                }),
            },
            ActionDescriptor {
                name: "process".to_string(),
                description: "Process data through the component".to_string(),
                parameters: json!({
                    "type": "object",
                    "description": "Input data for processing"
                }),
            },
        ]
    }

    pub fn schema(version: &str) -> ActionSchema {
        ActionSchema {
            name: SERVER_NAME.to_string(),
            version: version.to_string(),
            description: SERVER_DESCRIPTION.to_string(),
            actions: Self::list_actions(),
        }
    }
}

/// Build the action router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mcp", post(invoke))
        .route("/mcp/schema", get(schema))
}

/// POST /mcp - Invoke an action. Always 200; failures are in the envelope.
async fn invoke(State(state): State<Arc<AppState>>, body: Bytes) -> Json<ActionResponse> {
    let default_action = ActionRequest::default().action;
    let request = match parse_json(&body).map(ActionRequest::from_value) {
        Ok(Some(request)) => request,
        Ok(None) => {
            let e = Error::ActionRequestNotObject;
            return Json(ActionAdapter::failure(&default_action, &e));
        }
        Err(e) => return Json(ActionAdapter::failure(&default_action, &e)),
    };

    let action = request.action.clone();
    let response = run_blocking(&state, move |dispatcher| {
        Ok(ActionAdapter::handle_request(dispatcher, request))
    })
    .await
    .unwrap_or_else(|e| ActionAdapter::failure(&action, &e));

    Json(response)
}

/// GET /mcp/schema - Server description and action catalog.
async fn schema() -> Json<ActionSchema> {
    Json(ActionAdapter::schema(crate::VERSION))
}
