//! Setup, health, and webhook-registration route handlers.

use super::*;

pub(super) async fn handle_health() -> Response {
    (StatusCode::OK, Json(json!({"status": "healthy"}))).into_response()
}

pub(super) async fn handle_setup(State(state): State<Arc<BudgetGatewayState>>) -> Response {
    let status_task_gid = match state.runtime.find_or_create_status_task().await {
        Ok(gid) => gid,
        Err(error) => {
            tracing::warn!("setup failed to prepare status task: {error:#}");
            return error_response(format!("failed to prepare status task: {error}"));
        }
    };
    match state.runtime.run().await {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": format!(
                    "status task {status_task_gid} ready; recomputed metrics across {} tasks",
                    report.snapshot.total_tasks
                ),
            })),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!("setup recomputation failed: {error:#}");
            error_response(format!("recomputation failed: {error}"))
        }
    }
}

pub(super) async fn handle_register_webhook(
    State(state): State<Arc<BudgetGatewayState>>,
) -> Response {
    let target_url = format!(
        "{}{}",
        state.config.public_base_url.trim_end_matches('/'),
        WEBHOOK_ENDPOINT
    );
    match state
        .tracker
        .create_webhook(&state.runtime.config().project_gid, &target_url)
        .await
    {
        Ok(webhook_gid) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "webhook_gid": webhook_gid,
                "target_url": target_url,
            })),
        )
            .into_response(),
        Err(error) => {
            tracing::warn!("webhook registration failed: {error:#}");
            error_response(format!("webhook registration failed: {error}"))
        }
    }
}
