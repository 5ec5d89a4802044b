//! Spending analytics: per-category aggregation with search filtering and
//! multi-key sorting. All functions are pure transforms over the expense
//! set fetched by the caller; results are recomputed fresh on every call.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::Expense;

/// Per-category share of the overall spend. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Sort orderings for the breakdown list. Ties keep their pre-sort order
/// (stable sort, no secondary key).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    AmountDesc,
    AmountAsc,
    NameAsc,
    NameDesc,
    PercentageDesc,
    PercentageAsc,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "amount_asc" => Self::AmountAsc,
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "percentage_desc" => Self::PercentageDesc,
            "percentage_asc" => Self::PercentageAsc,
            _ => Self::AmountDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AmountDesc => "amount_desc",
            Self::AmountAsc => "amount_asc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PercentageDesc => "percentage_desc",
            Self::PercentageAsc => "percentage_asc",
        }
    }
}

/// Total spend across all expenses.
pub fn total_spent(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Reduce the full expense set to one entry per distinct category, with its
/// share of the overall spend. Percentages are 0 when there is no spend at
/// all.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryBreakdown> {
    let mut category_totals: HashMap<String, f64> = HashMap::new();

    for expense in expenses {
        *category_totals.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }

    let total: f64 = category_totals.values().sum();

    category_totals
        .into_iter()
        .map(|(category, amount)| CategoryBreakdown {
            category,
            amount,
            percentage: if total > 0.0 {
                (amount / total) * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Case-insensitive substring filter matched against the category name, the
/// amount formatted to 2 decimal places, or the percentage formatted to 1
/// decimal place. A blank query matches everything.
pub fn filter_breakdowns(breakdowns: &[CategoryBreakdown], query: &str) -> Vec<CategoryBreakdown> {
    let query = query.to_lowercase().trim().to_string();
    if query.is_empty() {
        return breakdowns.to_vec();
    }

    breakdowns
        .iter()
        .filter(|b| {
            b.category.to_lowercase().contains(&query)
                || format!("{:.2}", b.amount).contains(&query)
                || format!("{:.1}", b.percentage).contains(&query)
        })
        .cloned()
        .collect()
}

/// Order the breakdown list. Category comparison is case-insensitive.
pub fn sort_breakdowns(
    mut breakdowns: Vec<CategoryBreakdown>,
    order: SortOrder,
) -> Vec<CategoryBreakdown> {
    match order {
        SortOrder::AmountDesc => {
            breakdowns.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        }
        SortOrder::AmountAsc => {
            breakdowns.sort_by(|a, b| a.amount.total_cmp(&b.amount));
        }
        SortOrder::NameAsc => {
            breakdowns.sort_by(|a, b| a.category.to_lowercase().cmp(&b.category.to_lowercase()));
        }
        SortOrder::NameDesc => {
            breakdowns.sort_by(|a, b| b.category.to_lowercase().cmp(&a.category.to_lowercase()));
        }
        SortOrder::PercentageDesc => {
            breakdowns.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        }
        SortOrder::PercentageAsc => {
            breakdowns.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
        }
    }
    breakdowns
}

/// The full analytics pipeline: aggregate, filter, sort.
pub fn compute_breakdowns(
    expenses: &[Expense],
    query: &str,
    order: SortOrder,
) -> Vec<CategoryBreakdown> {
    let all = category_breakdown(expenses);
    let filtered = filter_breakdowns(&all, query);
    sort_breakdowns(filtered, order)
}
