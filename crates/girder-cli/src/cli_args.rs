use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "girder",
    about = "Webhook-driven budget status aggregator for one tracked project",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "GIRDER_TRACKER_TOKEN",
        hide_env_values = true,
        help = "Personal access token for the tracker API."
    )]
    pub tracker_token: String,

    #[arg(
        long,
        env = "GIRDER_PROJECT_GID",
        help = "Gid of the project whose tasks are aggregated."
    )]
    pub project_gid: String,

    #[arg(
        long,
        env = "GIRDER_TRACKER_API_BASE",
        default_value = "https://app.asana.com/api/1.0",
        help = "Base URL of the tracker REST API."
    )]
    pub tracker_api_base: String,

    #[arg(
        long,
        env = "GIRDER_BIND",
        default_value = "127.0.0.1:8080",
        help = "Address the gateway listens on."
    )]
    pub bind: String,

    #[arg(
        long,
        env = "GIRDER_PUBLIC_BASE_URL",
        default_value = "http://127.0.0.1:8080",
        help = "Public base URL the tracker can reach for webhook deliveries."
    )]
    pub public_base_url: String,

    #[arg(
        long,
        env = "GIRDER_ESTIMATED_FIELD",
        default_value = "Estimated Cost",
        help = "Name of the numeric custom field holding each task's estimate."
    )]
    pub estimated_field_name: String,

    #[arg(
        long,
        env = "GIRDER_ACTUAL_FIELD",
        default_value = "Actual Cost",
        help = "Name of the numeric custom field holding each task's actual cost."
    )]
    pub actual_field_name: String,

    #[arg(
        long,
        env = "GIRDER_STATUS_TASK_NAME",
        default_value = "Project Status",
        help = "Name of the task whose notes hold the rendered budget summary."
    )]
    pub status_task_name: String,

    #[arg(
        long,
        env = "GIRDER_RECOMPUTE_ON_HEARTBEAT",
        help = "Recompute metrics on heartbeat deliveries carrying an empty event list."
    )]
    pub recompute_on_heartbeat: bool,
}
