//! Budget gateway HTTP surface: webhook handshake/event routing plus the
//! setup, health, and webhook-registration endpoints.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use girder_metrics::BudgetStatusRuntime;
use girder_tracker::TrackerApiClient;
use serde_json::json;
use tokio::net::TcpListener;

mod endpoints;
mod entry_handlers;
mod server_bootstrap;
mod types;
mod webhook_runtime;

use endpoints::{
    HEALTH_ENDPOINT, HOOK_SECRET_HEADER, REGISTER_WEBHOOK_ENDPOINT, SETUP_ENDPOINT,
    WEBHOOK_ENDPOINT,
};
use entry_handlers::{handle_health, handle_register_webhook, handle_setup};
use webhook_runtime::handle_webhook;

pub use server_bootstrap::run_budget_gateway_server;
pub use types::{WebhookChange, WebhookEnvelope, WebhookEvent, WebhookResource};

/// Gateway knobs independent of the tracked project.
#[derive(Debug, Clone)]
pub struct BudgetGatewayConfig {
    pub bind: String,
    pub public_base_url: String,
    pub recompute_on_heartbeat: bool,
}

/// Shared state behind every route.
pub struct BudgetGatewayState {
    pub(crate) runtime: BudgetStatusRuntime,
    pub(crate) tracker: TrackerApiClient,
    pub(crate) config: BudgetGatewayConfig,
    // Last-write-wins across concurrent handshake deliveries; never
    // verified on event deliveries.
    pub(crate) webhook_secret: Mutex<Option<String>>,
}

impl BudgetGatewayState {
    pub fn new(
        runtime: BudgetStatusRuntime,
        tracker: TrackerApiClient,
        config: BudgetGatewayConfig,
    ) -> Self {
        Self {
            runtime,
            tracker,
            config,
            webhook_secret: Mutex::new(None),
        }
    }

    /// Most recently stored handshake secret, if any delivery completed one.
    pub fn webhook_secret(&self) -> Option<String> {
        self.webhook_secret
            .lock()
            .ok()
            .and_then(|slot| slot.clone())
    }
}

pub fn build_budget_gateway_router(state: Arc<BudgetGatewayState>) -> Router {
    Router::new()
        .route(WEBHOOK_ENDPOINT, post(handle_webhook))
        .route(SETUP_ENDPOINT, get(handle_setup))
        .route(HEALTH_ENDPOINT, get(handle_health))
        .route(REGISTER_WEBHOOK_ENDPOINT, get(handle_register_webhook))
        .with_state(state)
}

pub(crate) fn error_response(message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"status": "error", "message": message.into()})),
    )
        .into_response()
}
