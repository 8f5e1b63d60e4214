//! Rendered report contract for the status task notes.

use crate::budget_math::BudgetSnapshot;

/// Renders the budget summary written into the status task's notes.
///
/// The layout is a fixed contract: money to two decimal places, percentages
/// to one, and the overbudget section only when at least one task is over.
/// Equal snapshots render byte-identical text.
pub fn render_budget_report(snapshot: &BudgetSnapshot) -> String {
    let mut report = String::new();
    report.push_str("# Construction Project Budget Summary\n\n");
    report.push_str("## Overall Budget\n");
    report.push_str(&format!(
        "- Total Estimated Budget: ${:.2}\n",
        snapshot.total_estimated
    ));
    report.push_str(&format!(
        "- Total Actual Cost Incurred: ${:.2}\n",
        snapshot.total_actual
    ));
    report.push_str(&format!("- Remaining Budget: ${:.2}\n", snapshot.remaining()));
    report.push_str(&format!(
        "- Budget Utilization: {:.1}%\n",
        snapshot.utilization_percent()
    ));
    report.push_str("\n## Progress\n");
    report.push_str(&format!("- Total Tasks: {}\n", snapshot.total_tasks));
    report.push_str(&format!(
        "- Completed Tasks (with actual costs): {}\n",
        snapshot.completed_tasks
    ));
    report.push_str(&format!(
        "- Project Completion: {:.1}%\n",
        snapshot.completion_percent()
    ));
    if !snapshot.overbudget.is_empty() {
        report.push_str("\n## Overbudget Items\n");
        for item in &snapshot.overbudget {
            report.push_str(&format!(
                "- {}: Estimated ${:.2}, Actual ${:.2} (${:.2} over budget)\n",
                item.name, item.estimated, item.actual, item.over_by
            ));
        }
        report.push_str(&format!(
            "Total Amount Over Budget: ${:.2}\n",
            snapshot.total_overbudget()
        ));
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget_math::{accumulate_budget, TaskCosts};

    fn reference_snapshot() -> BudgetSnapshot {
        accumulate_budget(&[
            TaskCosts {
                name: "task A".to_string(),
                estimated: 100.0,
                actual: 120.0,
            },
            TaskCosts {
                name: "task B".to_string(),
                estimated: 50.0,
                actual: 0.0,
            },
            TaskCosts {
                name: "task C".to_string(),
                estimated: 200.0,
                actual: 200.0,
            },
        ])
    }

    #[test]
    fn renders_full_report_layout() {
        let report = render_budget_report(&reference_snapshot());
        assert_eq!(
            report,
            "# Construction Project Budget Summary\n\
             \n\
             ## Overall Budget\n\
             - Total Estimated Budget: $350.00\n\
             - Total Actual Cost Incurred: $320.00\n\
             - Remaining Budget: $30.00\n\
             - Budget Utilization: 91.4%\n\
             \n\
             ## Progress\n\
             - Total Tasks: 3\n\
             - Completed Tasks (with actual costs): 2\n\
             - Project Completion: 66.7%\n\
             \n\
             ## Overbudget Items\n\
             - task A: Estimated $100.00, Actual $120.00 ($20.00 over budget)\n\
             Total Amount Over Budget: $20.00\n"
        );
    }

    #[test]
    fn omits_overbudget_section_when_nothing_is_over() {
        let snapshot = accumulate_budget(&[TaskCosts {
            name: "task".to_string(),
            estimated: 10.0,
            actual: 10.0,
        }]);
        let report = render_budget_report(&snapshot);
        assert!(!report.contains("Overbudget Items"));
        assert!(report.ends_with("- Project Completion: 100.0%\n"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let snapshot = reference_snapshot();
        assert_eq!(
            render_budget_report(&snapshot),
            render_budget_report(&snapshot)
        );
    }

    #[test]
    fn empty_project_renders_zeroes() {
        let report = render_budget_report(&BudgetSnapshot::default());
        assert!(report.contains("- Total Estimated Budget: $0.00\n"));
        assert!(report.contains("- Budget Utilization: 0.0%\n"));
        assert!(report.contains("- Project Completion: 0.0%\n"));
    }
}
