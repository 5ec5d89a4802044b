use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub user_id: i64,
    pub category: String,
    pub limit: f64,
}

/// Result of evaluating a candidate expense amount against a category budget.
/// Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheckResult {
    pub exceeds_budget: bool,
    pub budget_limit: f64,
    pub current_spent: f64,
    pub new_total: f64,
}

impl BudgetCheckResult {
    /// Neutral result when no budget is set for the category: absence of a
    /// budget means no check applies.
    pub fn no_budget() -> Self {
        Self {
            exceeds_budget: false,
            budget_limit: 0.0,
            current_spent: 0.0,
            new_total: 0.0,
        }
    }
}
