//! Wire types for the tracker REST API.
//!
//! Every tracker payload is wrapped in a `{"data": ...}` envelope; list
//! responses may carry a `next_page` offset cursor.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: T,
    #[serde(default)]
    pub(crate) next_page: Option<NextPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NextPage {
    pub(crate) offset: String,
}

/// Compact task row returned by project task enumeration.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSummary {
    pub gid: String,
    pub name: String,
}

/// Full task detail including custom field values.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDetail {
    pub gid: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,
}

impl TaskDetail {
    /// Reads a numeric custom field by gid; missing or empty values read as zero.
    pub fn number_value(&self, field_gid: &str) -> f64 {
        self.custom_fields
            .iter()
            .find(|field| field.gid == field_gid)
            .and_then(|field| field.number_value)
            .unwrap_or(0.0)
    }
}

/// Per-task custom field instance.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldValue {
    pub gid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub number_value: Option<f64>,
}

/// Project-level custom field configuration entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldSetting {
    pub custom_field: CustomFieldRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldRef {
    pub gid: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WebhookSubscription {
    pub(crate) gid: String,
}
