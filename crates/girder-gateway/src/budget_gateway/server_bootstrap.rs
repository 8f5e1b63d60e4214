//! Budget gateway server bootstrap and shutdown wiring.

use super::*;

pub async fn run_budget_gateway_server(state: BudgetGatewayState) -> Result<()> {
    let bind_addr = state
        .config
        .bind
        .parse::<SocketAddr>()
        .with_context(|| format!("invalid --bind '{}'", state.config.bind))?;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind budget gateway on {bind_addr}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound gateway address")?;

    println!(
        "budget gateway listening: addr={local_addr} webhook={WEBHOOK_ENDPOINT} project={}",
        state.runtime.config().project_gid
    );

    let app = build_budget_gateway_router(Arc::new(state));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("budget gateway server exited unexpectedly")
}
