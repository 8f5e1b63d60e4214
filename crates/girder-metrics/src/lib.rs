//! Budget metrics aggregation over one tracked project.
//!
//! Splits into a pure accumulation core (`budget_math`), the rendered report
//! contract (`budget_report`), and the orchestrated tracker-backed run
//! (`budget_runtime`).

pub mod budget_math;
pub mod budget_report;
pub mod budget_runtime;

pub use budget_math::{accumulate_budget, BudgetSnapshot, OverbudgetItem, TaskCosts};
pub use budget_report::render_budget_report;
pub use budget_runtime::{
    BudgetRunError, BudgetRunReport, BudgetRuntimeConfig, BudgetStatusRuntime, TrackedFieldGids,
};
