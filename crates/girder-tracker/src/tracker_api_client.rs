//! Tracker REST API client used by aggregation and webhook registration flows.

use anyhow::{bail, Context, Result};
use girder_core::truncate_for_error;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::tracker_types::{
    CustomFieldSetting, Envelope, TaskDetail, TaskSummary, WebhookSubscription,
};

const PAGE_LIMIT: &str = "100";
const TASK_DETAIL_OPT_FIELDS: &str = "name,notes,custom_fields.name,custom_fields.number_value";

/// Authenticated client for one tracker workspace.
///
/// Requests carry no timeout, retry, or backoff: a slow tracker call stalls
/// only the request that issued it.
#[derive(Clone)]
pub struct TrackerApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl TrackerApiClient {
    pub fn new(api_base: String, token: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Girder-budget-status"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let auth_header = format!("Bearer {}", token.trim());
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&auth_header)
                .context("invalid tracker authorization header")?,
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to create tracker api client")?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Lists the project's custom field configuration entries.
    pub async fn list_custom_field_settings(
        &self,
        project_gid: &str,
    ) -> Result<Vec<CustomFieldSetting>> {
        self.list_paginated(
            "list custom field settings",
            &format!(
                "{}/projects/{project_gid}/custom_field_settings",
                self.api_base
            ),
            &[("opt_fields", "custom_field.name")],
        )
        .await
    }

    /// Enumerates every task in the project, following pagination.
    pub async fn list_project_tasks(&self, project_gid: &str) -> Result<Vec<TaskSummary>> {
        self.list_paginated(
            "list project tasks",
            &format!("{}/projects/{project_gid}/tasks", self.api_base),
            &[("opt_fields", "name")],
        )
        .await
    }

    /// Fetches one task's full detail including custom field values.
    pub async fn get_task(&self, task_gid: &str) -> Result<TaskDetail> {
        let envelope: Envelope<TaskDetail> = self
            .request_json("get task", || {
                self.http
                    .get(format!("{}/tasks/{task_gid}", self.api_base))
                    .query(&[("opt_fields", TASK_DETAIL_OPT_FIELDS)])
            })
            .await?;
        Ok(envelope.data)
    }

    /// Creates a task in the project and returns its detail.
    pub async fn create_task(
        &self,
        project_gid: &str,
        name: &str,
        notes: &str,
    ) -> Result<TaskDetail> {
        let payload = json!({
            "data": {
                "name": name,
                "notes": notes,
                "projects": [project_gid],
            }
        });
        let envelope: Envelope<TaskDetail> = self
            .request_json("create task", || {
                self.http
                    .post(format!("{}/tasks", self.api_base))
                    .json(&payload)
            })
            .await?;
        Ok(envelope.data)
    }

    /// Overwrites a task's notes field.
    pub async fn update_task_notes(&self, task_gid: &str, notes: &str) -> Result<()> {
        let payload = json!({ "data": { "notes": notes } });
        self.request_success("update task notes", || {
            self.http
                .put(format!("{}/tasks/{task_gid}", self.api_base))
                .json(&payload)
        })
        .await
    }

    /// Subscribes a webhook target to the given resource and returns the new
    /// subscription gid.
    pub async fn create_webhook(&self, resource_gid: &str, target_url: &str) -> Result<String> {
        let payload = json!({
            "data": {
                "resource": resource_gid,
                "target": target_url,
            }
        });
        let envelope: Envelope<WebhookSubscription> = self
            .request_json("create webhook", || {
                self.http
                    .post(format!("{}/webhooks", self.api_base))
                    .json(&payload)
            })
            .await?;
        Ok(envelope.data.gid)
    }

    async fn list_paginated<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
        base_query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let offset_value = offset.take();
            let envelope: Envelope<Vec<T>> = self
                .request_json(operation, || {
                    let mut request = self
                        .http
                        .get(url)
                        .query(base_query)
                        .query(&[("limit", PAGE_LIMIT)]);
                    if let Some(offset_value) = offset_value.as_deref() {
                        request = request.query(&[("offset", offset_value)]);
                    }
                    request
                })
                .await?;
            rows.extend(envelope.data);
            match envelope.next_page {
                Some(next_page) => offset = Some(next_page.offset),
                None => break,
            }
        }
        Ok(rows)
    }

    async fn request_json<T, F>(&self, operation: &str, builder: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> reqwest::RequestBuilder,
    {
        let response = builder()
            .send()
            .await
            .with_context(|| format!("tracker api {operation} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "tracker api {operation} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode tracker {operation} response"))
    }

    async fn request_success<F>(&self, operation: &str, builder: F) -> Result<()>
    where
        F: FnOnce() -> reqwest::RequestBuilder,
    {
        let response = builder()
            .send()
            .await
            .with_context(|| format!("tracker api {operation} request failed"))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "tracker api {operation} failed with status {}: {}",
                status.as_u16(),
                truncate_for_error(&body, 800)
            );
        }
        Ok(())
    }
}
