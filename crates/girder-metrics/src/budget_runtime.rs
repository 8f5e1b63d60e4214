//! Tracker-backed aggregation run: resolve tracked fields, collect task
//! costs, publish the rendered report into the status task.

use anyhow::Result;
use girder_tracker::TrackerApiClient;
use thiserror::Error;

use crate::budget_math::{accumulate_budget, BudgetSnapshot, TaskCosts};
use crate::budget_report::render_budget_report;

const STATUS_TASK_PLACEHOLDER_NOTES: &str =
    "Budget summary will appear here after the next recomputation.";

#[derive(Debug, Clone)]
/// Project binding for one aggregation runtime.
pub struct BudgetRuntimeConfig {
    pub project_gid: String,
    pub estimated_field_name: String,
    pub actual_field_name: String,
    pub status_task_name: String,
}

#[derive(Debug, Error)]
/// Failure modes of an aggregation run.
///
/// Missing custom field configuration is detected before any task
/// enumeration and stays distinct from tracker call failures.
pub enum BudgetRunError {
    #[error("custom field '{name}' is not configured on the project")]
    MissingCustomField { name: String },
    #[error(transparent)]
    Tracker(#[from] anyhow::Error),
}

/// Gids of the two tracked cost fields, re-resolved by name on every run.
#[derive(Debug, Clone)]
pub struct TrackedFieldGids {
    pub estimated: String,
    pub actual: String,
}

/// Outcome of a successful aggregation run.
#[derive(Debug, Clone)]
pub struct BudgetRunReport {
    pub status_task_gid: String,
    pub snapshot: BudgetSnapshot,
    pub report: String,
}

/// Owns the tracker client and project binding for aggregation runs.
///
/// Stateless across runs: the status task is re-discovered by name and the
/// field gids re-resolved on every invocation.
pub struct BudgetStatusRuntime {
    client: TrackerApiClient,
    config: BudgetRuntimeConfig,
}

impl BudgetStatusRuntime {
    pub fn new(client: TrackerApiClient, config: BudgetRuntimeConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BudgetRuntimeConfig {
        &self.config
    }

    /// Resolves the gids of the two tracked cost fields by name.
    ///
    /// Both fields must be configured on the project; a missing field aborts
    /// the run before any task is enumerated.
    pub async fn resolve_tracked_fields(&self) -> Result<TrackedFieldGids, BudgetRunError> {
        let settings = self
            .client
            .list_custom_field_settings(&self.config.project_gid)
            .await?;
        let resolve = |name: &str| {
            settings
                .iter()
                .find(|setting| setting.custom_field.name == name)
                .map(|setting| setting.custom_field.gid.clone())
        };
        let estimated = resolve(&self.config.estimated_field_name).ok_or_else(|| {
            BudgetRunError::MissingCustomField {
                name: self.config.estimated_field_name.clone(),
            }
        })?;
        let actual = resolve(&self.config.actual_field_name).ok_or_else(|| {
            BudgetRunError::MissingCustomField {
                name: self.config.actual_field_name.clone(),
            }
        })?;
        Ok(TrackedFieldGids { estimated, actual })
    }

    async fn collect_task_costs(&self, tracked: &TrackedFieldGids) -> Result<Vec<TaskCosts>> {
        let summaries = self
            .client
            .list_project_tasks(&self.config.project_gid)
            .await?;
        let mut rows = Vec::with_capacity(summaries.len());
        for summary in summaries {
            if summary.name == self.config.status_task_name {
                continue;
            }
            let detail = self.client.get_task(&summary.gid).await?;
            rows.push(TaskCosts {
                name: detail.name.clone(),
                estimated: detail.number_value(&tracked.estimated),
                actual: detail.number_value(&tracked.actual),
            });
        }
        Ok(rows)
    }

    /// Locates the status task by exact name, creating it with placeholder
    /// notes when absent.
    pub async fn find_or_create_status_task(&self) -> Result<String> {
        let summaries = self
            .client
            .list_project_tasks(&self.config.project_gid)
            .await?;
        if let Some(existing) = summaries
            .into_iter()
            .find(|task| task.name == self.config.status_task_name)
        {
            return Ok(existing.gid);
        }
        tracing::info!(
            "creating status task '{}' in project {}",
            self.config.status_task_name,
            self.config.project_gid
        );
        let created = self
            .client
            .create_task(
                &self.config.project_gid,
                &self.config.status_task_name,
                STATUS_TASK_PLACEHOLDER_NOTES,
            )
            .await?;
        Ok(created.gid)
    }

    /// Runs one full aggregation: resolve fields, collect costs, accumulate,
    /// render, and overwrite the status task's notes.
    ///
    /// Partial tracker writes before a failure point are not rolled back;
    /// the task store has no transaction concept.
    pub async fn run(&self) -> Result<BudgetRunReport, BudgetRunError> {
        let tracked = self.resolve_tracked_fields().await?;
        let rows = self.collect_task_costs(&tracked).await?;
        let snapshot = accumulate_budget(&rows);
        let status_task_gid = self.find_or_create_status_task().await?;
        let report = render_budget_report(&snapshot);
        self.client
            .update_task_notes(&status_task_gid, &report)
            .await?;
        tracing::debug!(
            total_tasks = snapshot.total_tasks,
            completed_tasks = snapshot.completed_tasks,
            overbudget = snapshot.overbudget.len(),
            "budget metrics recomputed"
        );
        Ok(BudgetRunReport {
            status_task_gid,
            snapshot,
            report,
        })
    }
}
