use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::queries::categories;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewCategoryRequest {
    pub name: String,
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;
    let names = categories::list_categories(&conn, user.id)?;
    Ok(Json(names))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewCategoryRequest>,
) -> AppResult<Json<Value>> {
    let user = state.require_user()?;
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }

    let conn = state.db.get()?;
    let added = categories::add_category(&conn, user.id, name)?;
    Ok(Json(json!({ "added": added })))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Value>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;
    let removed = categories::remove_category(&conn, user.id, &name)?;
    Ok(Json(json!({ "removed": removed })))
}
