pub mod account;
pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod expenses;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Authentication
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/reset-password", post(auth::reset_password))
        // Account
        .route("/api/account/username", put(account::update_username))
        .route("/api/account/password", put(account::update_password))
        // Expense CRUD
        .route("/api/expenses", get(expenses::list))
        .route("/api/expenses", post(expenses::create))
        .route("/api/expenses", delete(expenses::clear))
        .route("/api/expenses/budget-check", get(expenses::budget_check))
        .route("/api/expenses/:id", put(expenses::update))
        .route("/api/expenses/:id", delete(expenses::delete))
        // Budgets
        .route("/api/budgets", get(budgets::list))
        .route("/api/budgets", put(budgets::upsert))
        .route("/api/budgets/:category", delete(budgets::delete))
        // Categories
        .route("/api/categories", get(categories::list))
        .route("/api/categories", post(categories::create))
        .route("/api/categories/:name", delete(categories::delete))
        // Analytics
        .route("/api/analytics/breakdown", get(analytics::breakdown))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
