//! Typed async client for the project-management tracker REST API.

pub mod tracker_api_client;
pub mod tracker_types;

pub use tracker_api_client::TrackerApiClient;
pub use tracker_types::{CustomFieldSetting, CustomFieldValue, TaskDetail, TaskSummary};
