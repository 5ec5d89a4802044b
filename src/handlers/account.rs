use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn update_username(
    State(state): State<AppState>,
    Json(req): Json<UpdateUsernameRequest>,
) -> AppResult<Json<User>> {
    let user = state.auth.update_username(&req.username)?;
    Ok(Json(user))
}

pub async fn update_password(
    State(state): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> AppResult<Json<Value>> {
    state
        .auth
        .update_password(&req.current_password, &req.new_password)?;
    Ok(Json(json!({ "success": true })))
}
