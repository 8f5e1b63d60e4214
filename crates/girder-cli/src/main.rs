//! `girder` binary: configuration parsing, tracing bootstrap, server startup.

mod bootstrap_helpers;
mod cli_args;

use anyhow::Result;
use clap::Parser;
use girder_gateway::{run_budget_gateway_server, BudgetGatewayConfig, BudgetGatewayState};
use girder_metrics::{BudgetRuntimeConfig, BudgetStatusRuntime};
use girder_tracker::TrackerApiClient;

use bootstrap_helpers::init_tracing;
use cli_args::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let client = TrackerApiClient::new(cli.tracker_api_base.clone(), cli.tracker_token.clone())?;
    let runtime = BudgetStatusRuntime::new(
        client.clone(),
        BudgetRuntimeConfig {
            project_gid: cli.project_gid.clone(),
            estimated_field_name: cli.estimated_field_name.clone(),
            actual_field_name: cli.actual_field_name.clone(),
            status_task_name: cli.status_task_name.clone(),
        },
    );
    let state = BudgetGatewayState::new(
        runtime,
        client,
        BudgetGatewayConfig {
            bind: cli.bind.clone(),
            public_base_url: cli.public_base_url.clone(),
            recompute_on_heartbeat: cli.recompute_on_heartbeat,
        },
    );

    run_budget_gateway_server(state).await
}
