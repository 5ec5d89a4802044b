//! Integration tests for signup, login, session handling and account updates.

mod common;

use axum::http::StatusCode;
use common::TestClient;
use serde_json::{json, Value};

#[tokio::test]
async fn test_signup_establishes_session() {
    let client = TestClient::new();

    let (status, body) = client.signup("alice", "secret", "rex").await;
    assert_eq!(status, StatusCode::OK);
    let user: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(user["username"], "alice");

    let (status, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me.unwrap()["user"]["username"], "alice");
}

#[tokio::test]
async fn test_signup_validation_rejected_before_storage() {
    let client = TestClient::new();

    let (status, _) = client.signup("", "secret", "rex").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.signup("alice", "ab", "rex").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client.signup("alice", "secret", "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // None of the rejected signups may have created a session.
    let (_, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert!(me.unwrap()["user"].is_null());
}

#[tokio::test]
async fn test_password_length_counts_characters_not_bytes() {
    let client = TestClient::new();

    // Two characters, four bytes: still too short.
    let (status, _) = client.signup("alice", "éé", "rex").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Three multibyte characters satisfy the minimum.
    let (status, _) = client.signup("alice", "éäö", "rex").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_username_conflict() {
    let client = TestClient::new();

    let (status, _) = client.signup("alice", "secret", "rex").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = client.signup("alice", "other", "cat").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let client = TestClient::new();
    client.signup("alice", "secret", "rex").await;
    client.logout().await;

    let (status, _) = client.login("alice", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = client.login("nobody", "secret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = client.login("alice", "secret").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let client = TestClient::with_user("alice").await;

    assert_eq!(client.logout().await, StatusCode::OK);

    let (_, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert!(me.unwrap()["user"].is_null());

    // Data routes now reject.
    let (status, _) = client.get("/api/expenses").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stale_session_self_heals() {
    let client = TestClient::with_user("alice").await;

    // Simulate a data reset that leaves the session pointing at a gone user.
    {
        let conn = client.state.db.get().unwrap();
        conn.execute("DELETE FROM users", []).unwrap();
    }

    let (status, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert!(me.unwrap()["user"].is_null());

    // Idempotent: the session is cleared, subsequent calls stay logged out.
    let (_, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert!(me.unwrap()["user"].is_null());
}

#[tokio::test]
async fn test_reset_password_requires_matching_answer() {
    let client = TestClient::new();
    client.signup("alice", "secret", "rex").await;
    client.logout().await;

    let (status, body) = client
        .post_json(
            "/api/auth/reset-password",
            &json!({ "username": "alice", "security_answer": "wrong", "new_password": "newpass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], false);

    let (_, body) = client
        .post_json(
            "/api/auth/reset-password",
            &json!({ "username": "alice", "security_answer": "rex", "new_password": "newpass" }),
        )
        .await;
    let parsed: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed["success"], true);

    // Old password no longer works, new one does.
    let (status, _) = client.login("alice", "secret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = client.login("alice", "newpass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_username_refreshes_session() {
    let client = TestClient::with_user("alice").await;

    let (status, body) = client
        .put_json("/api/account/username", &json!({ "username": "alicia" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let user: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(user["username"], "alicia");

    let (_, me): (_, Option<Value>) = client.get_json("/api/auth/me").await;
    assert_eq!(me.unwrap()["user"]["username"], "alicia");
}

#[tokio::test]
async fn test_update_username_rejects_taken_name() {
    let client = TestClient::new();
    client.signup("bob", "secret", "rex").await;
    client.signup("alice", "secret", "rex").await;

    let (status, _) = client
        .put_json("/api/account/username", &json!({ "username": "bob" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_password_verifies_current() {
    let client = TestClient::with_user("alice").await;

    let (status, _) = client
        .put_json(
            "/api/account/password",
            &json!({ "current_password": "wrong", "new_password": "newpass" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = client
        .put_json(
            "/api/account/password",
            &json!({ "current_password": "secret", "new_password": "newpass" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    client.logout().await;
    let (status, _) = client.login("alice", "newpass").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_account_updates_require_session() {
    let client = TestClient::new();

    let (status, _) = client
        .put_json("/api/account/username", &json!({ "username": "ghost" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
