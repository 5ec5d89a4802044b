//! Budget evaluation: the "would this spend exceed the budget" check used
//! before adding or editing an expense. Pure read, never mutates.

use rusqlite::Connection;

use crate::db::queries::{budgets, expenses};
use crate::models::BudgetCheckResult;

/// Evaluate a candidate amount against the category budget.
///
/// Pass `exclude_expense_id` when editing an existing expense so its
/// pre-edit amount is not double-counted: the check then reflects the state
/// after the edit.
///
/// The boundary is inclusive: reaching the limit exactly counts as
/// exceeded.
pub fn check_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
    candidate_amount: f64,
    exclude_expense_id: Option<i64>,
) -> rusqlite::Result<BudgetCheckResult> {
    let Some(budget) = budgets::get_budget(conn, user_id, category)? else {
        return Ok(BudgetCheckResult::no_budget());
    };

    let current_spent = expenses::category_total(conn, user_id, category, exclude_expense_id)?;
    let new_total = current_spent + candidate_amount;

    Ok(BudgetCheckResult {
        exceeds_budget: new_total >= budget.limit,
        budget_limit: budget.limit,
        current_spent,
        new_total,
    })
}
