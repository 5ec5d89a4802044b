//! Shared test utilities for integration tests.
//!
//! Provides a `TestClient` that drives the full router against a fresh
//! in-memory database. Methods are intentionally broad to support the
//! scenarios across different test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pocketbook::config::Config;
use pocketbook::db::{create_in_memory_pool, migrations};
use pocketbook::handlers;
use pocketbook::state::AppState;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tower::ServiceExt;

pub struct TestClient {
    pub state: AppState,
}

impl TestClient {
    /// Create a new test client with a fresh in-memory database.
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 7080,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
        };

        let state = AppState::new(pool, config);

        Self { state }
    }

    /// Create a client with one signed-up, logged-in user.
    pub async fn with_user(username: &str) -> Self {
        let client = Self::new();
        let (status, _) = client.signup(username, "secret", "rex").await;
        assert_eq!(status, StatusCode::OK, "signup failed in test setup");
        client
    }

    pub fn router(&self) -> Router {
        handlers::routes().with_state(self.state.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.request(http::Method::GET, uri, None).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).ok())
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, String) {
        self.request(http::Method::POST, uri, Some(body.to_string()))
            .await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> (StatusCode, String) {
        self.request(http::Method::PUT, uri, Some(body.to_string()))
            .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.request(http::Method::DELETE, uri, None).await
    }

    async fn request(
        &self,
        method: http::Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(http::header::CONTENT_TYPE, "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        let response = self
            .router()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    // Domain helpers

    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        security_answer: &str,
    ) -> (StatusCode, String) {
        self.post_json(
            "/api/auth/signup",
            &json!({
                "username": username,
                "password": password,
                "security_answer": security_answer,
            }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, String) {
        self.post_json(
            "/api/auth/login",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn logout(&self) -> StatusCode {
        self.post_json("/api/auth/logout", &json!({})).await.0
    }

    /// Add an expense for the logged-in user, returning its id.
    pub async fn add_expense(&self, category: &str, amount: f64) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/expenses",
                &json!({ "category": category, "amount": amount, "date": "2024-01-01" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add_expense failed: {body}");

        let parsed: Value = serde_json::from_str(&body).expect("invalid expense JSON");
        parsed["id"].as_i64().expect("expense id missing")
    }

    pub async fn set_budget(&self, category: &str, limit: f64) -> StatusCode {
        self.put_json(
            "/api/budgets",
            &json!({ "category": category, "limit": limit }),
        )
        .await
        .0
    }
}
