use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub security_answer: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub username: String,
    pub security_answer: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user: Option<User>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state.auth.login(&req.username, &req.password)?;
    Ok(Json(user))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .auth
        .signup(&req.username, &req.password, &req.security_answer)?;
    Ok(Json(user))
}

pub async fn logout(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state.auth.logout()?;
    Ok(Json(json!({ "logged_out": true })))
}

pub async fn me(State(state): State<AppState>) -> AppResult<Json<CurrentUserResponse>> {
    let user = state.auth.current_user()?;
    Ok(Json(CurrentUserResponse { user }))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<Value>> {
    let success = state
        .auth
        .reset_password(&req.username, &req.security_answer, &req.new_password)?;
    Ok(Json(json!({ "success": success })))
}
