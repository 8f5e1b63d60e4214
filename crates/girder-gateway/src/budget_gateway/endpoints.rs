//! Endpoint and header constants for the budget gateway.

pub(super) const WEBHOOK_ENDPOINT: &str = "/webhook";
pub(super) const SETUP_ENDPOINT: &str = "/setup";
pub(super) const HEALTH_ENDPOINT: &str = "/health";
pub(super) const REGISTER_WEBHOOK_ENDPOINT: &str = "/register-webhook";

/// Handshake header issued by the tracker; echoed back verbatim to activate
/// the webhook subscription.
pub(super) const HOOK_SECRET_HEADER: &str = "X-Hook-Secret";
