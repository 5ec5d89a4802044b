use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries::expenses;
use crate::error::{AppError, AppResult};
use crate::models::{BudgetCheckResult, Expense, ExpenseUpdate, NewExpense};
use crate::services::budget;
use crate::state::AppState;

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn validate_amount(amount: f64) -> AppResult<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(AppError::Validation("Amount must be greater than zero".into()));
    }
    Ok(())
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Expense>>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;
    let expenses = expenses::list_expenses(&conn, user.id)?;
    Ok(Json(expenses))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewExpense>,
) -> AppResult<Json<Expense>> {
    let user = state.require_user()?;
    validate_amount(req.amount)?;
    if req.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".into()));
    }

    let conn = state.db.get()?;
    let date = req.date.clone().unwrap_or_else(today);
    let id = expenses::create_expense(&conn, user.id, &req, &date)?;

    let expense = expenses::get_expense(&conn, user.id, id)?
        .ok_or_else(|| AppError::Internal("Expense vanished after insert".into()))?;
    Ok(Json(expense))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ExpenseUpdate>,
) -> AppResult<Json<Expense>> {
    let user = state.require_user()?;
    validate_amount(req.amount)?;
    if req.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".into()));
    }

    let conn = state.db.get()?;
    let date = req.date.clone().unwrap_or_else(today);
    if !expenses::update_expense(&conn, user.id, id, &req, &date)? {
        return Err(AppError::NotFound(format!("Expense {id} not found")));
    }

    let expense = expenses::get_expense(&conn, user.id, id)?
        .ok_or_else(|| AppError::Internal("Expense vanished after update".into()))?;
    Ok(Json(expense))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;

    if !expenses::delete_expense(&conn, user.id, id)? {
        return Err(AppError::NotFound(format!("Expense {id} not found")));
    }
    Ok(Json(json!({ "deleted": true })))
}

pub async fn clear(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;
    let deleted = expenses::clear_expenses(&conn, user.id)?;
    Ok(Json(json!({ "deleted": deleted })))
}

#[derive(Debug, Deserialize)]
pub struct BudgetCheckParams {
    pub category: String,
    pub amount: f64,
    /// Expense id to leave out of the current total (edit flow).
    pub exclude: Option<i64>,
}

/// Evaluate whether spending `amount` in `category` would hit the budget.
/// Callers decide whether to warn, block, or proceed; nothing is mutated.
pub async fn budget_check(
    State(state): State<AppState>,
    Query(params): Query<BudgetCheckParams>,
) -> AppResult<Json<BudgetCheckResult>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;

    let result = budget::check_budget(
        &conn,
        user.id,
        &params.category,
        params.amount,
        params.exclude,
    )?;
    Ok(Json(result))
}
