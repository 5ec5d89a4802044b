use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries::budgets;
use crate::error::{AppError, AppResult};
use crate::models::Budget;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpsertBudgetRequest {
    pub category: String,
    pub limit: f64,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Budget>>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;
    let budgets = budgets::list_budgets(&conn, user.id)?;
    Ok(Json(budgets))
}

pub async fn upsert(
    State(state): State<AppState>,
    Json(req): Json<UpsertBudgetRequest>,
) -> AppResult<Json<Budget>> {
    let user = state.require_user()?;
    if req.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".into()));
    }
    if req.limit <= 0.0 || !req.limit.is_finite() {
        return Err(AppError::Validation("Limit must be greater than zero".into()));
    }

    let conn = state.db.get()?;
    budgets::upsert_budget(&conn, user.id, &req.category, req.limit)?;

    Ok(Json(Budget {
        user_id: user.id,
        category: req.category,
        limit: req.limit,
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Value>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;

    if !budgets::delete_budget(&conn, user.id, &category)? {
        return Err(AppError::NotFound(format!(
            "No budget for category {category}"
        )));
    }
    Ok(Json(json!({ "deleted": true })))
}
