use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries::expenses;
use crate::error::AppResult;
use crate::services::analytics::{self, CategoryBreakdown, SortOrder};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BreakdownParams {
    /// Case-insensitive substring matched against name, amount, percentage.
    pub query: Option<String>,
    /// One of amount_desc, amount_asc, name_asc, name_desc,
    /// percentage_desc, percentage_asc. Defaults to amount_desc.
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub total: f64,
    pub breakdowns: Vec<CategoryBreakdown>,
}

pub async fn breakdown(
    State(state): State<AppState>,
    Query(params): Query<BreakdownParams>,
) -> AppResult<Json<BreakdownResponse>> {
    let user = state.require_user()?;
    let conn = state.db.get()?;

    let expense_list = expenses::list_expenses(&conn, user.id)?;

    let order = params
        .sort
        .as_deref()
        .map(SortOrder::from_str)
        .unwrap_or_default();
    let query = params.query.as_deref().unwrap_or("");

    let breakdowns = analytics::compute_breakdowns(&expense_list, query, order);

    Ok(Json(BreakdownResponse {
        total: analytics::total_spent(&expense_list),
        breakdowns,
    }))
}
