//! Pure budget accumulation over per-task cost rows.

/// Parsed cost fields for one task, excluding the status task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCosts {
    pub name: String,
    pub estimated: f64,
    pub actual: f64,
}

/// A task whose actual cost exceeds its estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct OverbudgetItem {
    pub name: String,
    pub estimated: f64,
    pub actual: f64,
    pub over_by: f64,
}

/// Accumulated budget metrics for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetSnapshot {
    pub total_estimated: f64,
    pub total_actual: f64,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overbudget: Vec<OverbudgetItem>,
}

impl BudgetSnapshot {
    pub fn remaining(&self) -> f64 {
        self.total_estimated - self.total_actual
    }

    /// Actual spend as a percentage of the estimate; zero when nothing is
    /// estimated.
    pub fn utilization_percent(&self) -> f64 {
        if self.total_estimated == 0.0 {
            return 0.0;
        }
        self.total_actual / self.total_estimated * 100.0
    }

    /// Completed tasks as a percentage of all tasks; zero for an empty
    /// project.
    pub fn completion_percent(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 / self.total_tasks as f64 * 100.0
    }

    pub fn total_overbudget(&self) -> f64 {
        self.overbudget.iter().map(|item| item.over_by).sum()
    }
}

/// Folds task cost rows into a snapshot.
///
/// Estimates always accumulate; actual cost accumulates and marks the task
/// completed only when positive. A task is overbudget when its actual cost
/// strictly exceeds its estimate.
pub fn accumulate_budget(rows: &[TaskCosts]) -> BudgetSnapshot {
    let mut snapshot = BudgetSnapshot {
        total_tasks: rows.len(),
        ..BudgetSnapshot::default()
    };
    for row in rows {
        snapshot.total_estimated += row.estimated;
        if row.actual > 0.0 {
            snapshot.total_actual += row.actual;
            snapshot.completed_tasks += 1;
        }
        if row.actual > row.estimated {
            snapshot.overbudget.push(OverbudgetItem {
                name: row.name.clone(),
                estimated: row.estimated,
                actual: row.actual,
                over_by: row.actual - row.estimated,
            });
        }
    }
    snapshot
}
