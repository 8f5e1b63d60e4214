//! Webhook delivery wire types.

use serde::Deserialize;

/// Event delivery envelope; an empty event list is a heartbeat.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub resource: Option<WebhookResource>,
    #[serde(default)]
    pub change: Option<WebhookChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookResource {
    #[serde(default)]
    pub gid: String,
    #[serde(default)]
    pub resource_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub action: String,
}
