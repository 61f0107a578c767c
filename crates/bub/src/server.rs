//! HTTP transport
//!
//! - `POST /slack` receives Slack outgoing-webhook forms and dispatches them
//! - `POST /deploys/{resource}/complete` is called by the deploy pipeline
//! - `GET /health` for liveness checks
//!
//! Security properties:
//! - Token comparisons are constant-time
//! - When a token is configured, requests without it are rejected (fail closed)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{commands::dispatch, reply::ReplySink, App, Error, Result};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct ServerState {
    pub app: App,
    pub sink: Arc<dyn ReplySink>,
}

/// Fields of a Slack outgoing webhook we care about
#[derive(Debug, Deserialize)]
pub struct SlackWebhook {
    pub token: Option<String>,
    pub user_name: String,
    pub text: String,
    pub channel_name: Option<String>,
}

/// Body returned from the completion endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionResponse {
    pub resource: String,
    /// Whether a deploy was actually in progress
    pub cleared: bool,
}

const DEFAULT_CHANNEL: &str = "general";

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/slack", post(handle_slack))
        .route("/deploys/{resource}/complete", post(handle_complete))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn serve(state: ServerState, bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind {bind}: {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| Error::Server(e.to_string()))?;

    info!(%local_addr, "bub listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| Error::Server(e.to_string()))
}

async fn handle_slack(
    State(state): State<ServerState>,
    Form(hook): Form<SlackWebhook>,
) -> StatusCode {
    if let Some(expected) = &state.app.config().slack.token {
        if !tokens_match(expected, hook.token.as_deref().unwrap_or_default()) {
            warn!(user = %hook.user_name, "Rejected webhook with bad token");
            return StatusCode::UNAUTHORIZED;
        }
    }

    let channel = hook
        .channel_name
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CHANNEL);

    dispatch(
        &state.app,
        &hook.user_name,
        channel,
        &hook.text,
        state.sink.as_ref(),
    )
    .await;

    StatusCode::OK
}

async fn handle_complete(
    State(state): State<ServerState>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> std::result::Result<Json<CompletionResponse>, StatusCode> {
    if let Some(expected) = &state.app.config().completion_token {
        let provided = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default();
        if !tokens_match(expected, provided) {
            warn!(resource, "Rejected deploy completion with bad token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    let cleared = state.app.deploys.complete(&resource).await.is_some();
    Ok(Json(CompletionResponse { resource, cleared }))
}

/// Constant-time token comparison
fn tokens_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}
