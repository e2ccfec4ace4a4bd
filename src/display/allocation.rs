//! Allocation display formatting
//!
//! Secondary allocation tables and budget check results for terminal output.

use crate::form::{BudgetCheck, PLACEHOLDER_TEXT};
use crate::models::{AllocationRow, Axis};

/// Format secondary allocation rows as a table
pub fn format_repartition_list(rows: &[AllocationRow]) -> String {
    if rows.is_empty() {
        return format!("{}.\n", PLACEHOLDER_TEXT);
    }

    let name_width = rows
        .iter()
        .map(|r| r.profile_name.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<name_width$}  {:>8}  {:>8}\n",
        "ID",
        "Profile",
        "Build %",
        "Run %",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:->6}  {:-<name_width$}  {:->8}  {:->8}\n",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for row in rows {
        output.push_str(&format!(
            "{:>6}  {:<name_width$}  {:>8.2}  {:>8.2}\n",
            row.profile_id,
            row.profile_name,
            row.build_percent,
            row.run_percent,
            name_width = name_width,
        ));
    }

    output
}

/// Format the result of a budget check, per axis and per row
pub fn format_budget_check(check: &BudgetCheck) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<6}  {:>12}  {:>12}  {}\n",
        "Axis", "Primary CAF", "Secondary", "Status"
    ));
    output.push_str(&format!("{:-<6}  {:->12}  {:->12}  {:-<8}\n", "", "", "", ""));

    for axis in Axis::ALL {
        let budget = check.axis(axis);
        output.push_str(&format!(
            "{:<6}  {:>12.2}  {:>12.2}  {}\n",
            axis.label(),
            budget.available,
            budget.allocated,
            if budget.exceeded() { "EXCEEDED" } else { "ok" }
        ));
    }

    if !check.rows.is_empty() {
        output.push('\n');
        output.push_str("Secondary contributions:\n");
        for row in &check.rows {
            output.push_str(&format!(
                "  {:<20}  Build {:>10.2}  Run {:>10.2}\n",
                row.profile_name, row.build, row.run
            ));
        }
    }

    output
}
