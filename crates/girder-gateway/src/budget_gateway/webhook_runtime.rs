//! Webhook handshake completion and event-delivery routing.

use girder_core::current_unix_timestamp_ms;

use super::*;

pub(super) async fn handle_webhook(
    State(state): State<Arc<BudgetGatewayState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(secret) = headers.get(HOOK_SECRET_HEADER) {
        return complete_webhook_handshake(&state, secret);
    }

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(error) => {
            return error_response(format!("failed to parse webhook payload: {error}"));
        }
    };

    // At most one aggregation run per delivery, however many events match.
    if envelope_triggers_recompute(&envelope, state.config.recompute_on_heartbeat) {
        if let Err(error) = state.runtime.run().await {
            tracing::warn!("webhook-triggered recomputation failed: {error:#}");
            return error_response(format!("recomputation failed: {error}"));
        }
    }
    (StatusCode::OK, Json(json!({"status": "received"}))).into_response()
}

/// Stores the handshake secret and echoes it back in the same-named header.
///
/// The receipt log write runs on a detached task so log I/O never adds to
/// the handshake response latency; it has no ordering guarantee relative to
/// the response and its failure is ignored.
fn complete_webhook_handshake(
    state: &BudgetGatewayState,
    secret: &axum::http::HeaderValue,
) -> Response {
    let secret_value = match secret.to_str() {
        Ok(value) => value.to_string(),
        Err(_) => return error_response("webhook handshake secret is not valid UTF-8"),
    };
    if let Ok(mut slot) = state.webhook_secret.lock() {
        *slot = Some(secret_value.clone());
    }
    let secret_chars = secret_value.chars().count();
    tokio::spawn(async move {
        tracing::info!(
            received_unix_ms = current_unix_timestamp_ms(),
            secret_chars,
            "webhook handshake secret stored"
        );
    });
    (
        StatusCode::OK,
        [(HOOK_SECRET_HEADER, secret_value)],
        Json(json!({})),
    )
        .into_response()
}

/// Whether one event warrants recomputation: task-typed resources with a
/// structural action, or a change attributable to a custom field.
pub(super) fn webhook_event_is_relevant(event: &WebhookEvent) -> bool {
    let Some(resource) = event.resource.as_ref() else {
        return false;
    };
    if resource.resource_type != "task" {
        return false;
    }
    match event.action.as_str() {
        "added" | "removed" | "deleted" | "undeleted" => true,
        "changed" => event
            .change
            .as_ref()
            .is_some_and(|change| change.field == "custom_fields"),
        _ => false,
    }
}

pub(super) fn envelope_triggers_recompute(
    envelope: &WebhookEnvelope,
    recompute_on_heartbeat: bool,
) -> bool {
    if envelope.events.is_empty() {
        return recompute_on_heartbeat;
    }
    envelope.events.iter().any(webhook_event_is_relevant)
}
