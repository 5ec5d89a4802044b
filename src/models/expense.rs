use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    pub date: String,
    pub image_uri: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    /// Free-form date string; defaults to today when omitted.
    pub date: Option<String>,
    pub image_uri: Option<String>,
}

/// Full replacement of an existing expense (id and owner are immutable).
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseUpdate {
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    pub date: Option<String>,
    pub image_uri: Option<String>,
}
