//! Account and session management.
//!
//! Passwords and security answers are stored as Argon2 PHC strings.
//! Every other component resolves "who is logged in" through
//! [`AuthGate::current_user`], which also self-heals a session that points
//! at a user no longer present in the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;
use tracing::{debug, warn};

use crate::db::queries::users;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::session::SessionStore;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            AuthError::DuplicateUsername => AppError::Conflict(err.to_string()),
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::App(inner) => inner,
        }
    }
}

impl From<rusqlite::Error> for AuthError {
    fn from(err: rusqlite::Error) -> Self {
        AuthError::App(err.into())
    }
}

impl From<r2d2::Error> for AuthError {
    fn from(err: r2d2::Error) -> Self {
        AuthError::App(err.into())
    }
}

/// Resolves the current user and owns all credential operations.
/// Explicitly constructed and injected; holds its collaborators rather than
/// reaching for globals.
#[derive(Clone)]
pub struct AuthGate {
    db: DbPool,
    sessions: SessionStore,
}

impl AuthGate {
    pub fn new(db: DbPool, sessions: SessionStore) -> Self {
        Self { db, sessions }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let creds = {
            let conn = self.db.get()?;
            users::get_credentials(&conn, username)?
        };

        let Some(creds) = creds else {
            debug!(username, "Login failed: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_secret(password, &creds.password_hash) {
            debug!(username, "Login failed: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        self.sessions.set(creds.id, &creds.username)?;
        debug!(user_id = creds.id, "Login successful");

        Ok(User {
            id: creds.id,
            username: creds.username,
        })
    }

    pub fn signup(
        &self,
        username: &str,
        password: &str,
        security_answer: &str,
    ) -> Result<User, AuthError> {
        // Fail fast on bad input before touching storage.
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".into()));
        }
        if password.chars().count() < 3 {
            return Err(AuthError::Validation(
                "Password must be at least 3 characters".into(),
            ));
        }
        if security_answer.trim().is_empty() {
            return Err(AuthError::Validation("Security answer is required".into()));
        }

        let password_hash = hash_secret(password)?;
        let answer_hash = hash_secret(security_answer.trim())?;

        let user_id = {
            let conn = self.db.get()?;
            if users::username_taken(&conn, username)? {
                return Err(AuthError::DuplicateUsername);
            }
            users::create_user(&conn, username, &password_hash, &answer_hash)?
        };

        self.sessions.set(user_id, username)?;

        Ok(User {
            id: user_id,
            username: username.to_string(),
        })
    }

    /// The current user, or `None` when nobody is logged in. A session row
    /// referencing a user id missing from storage (e.g. after a data reset)
    /// is cleared and treated as logged out.
    pub fn current_user(&self) -> AppResult<Option<User>> {
        let Some(record) = self.sessions.get()? else {
            return Ok(None);
        };

        let exists = {
            let conn = self.db.get()?;
            users::user_exists(&conn, record.user_id)?
        };

        if !exists {
            warn!(
                user_id = record.user_id,
                "Session references missing user, logging out"
            );
            self.sessions.clear()?;
            return Ok(None);
        }

        Ok(Some(User {
            id: record.user_id,
            username: record.username,
        }))
    }

    pub fn logout(&self) -> AppResult<()> {
        self.sessions.clear()
    }

    /// The only recovery path for a forgotten password. True only when both
    /// the username and the security answer match a stored record.
    pub fn reset_password(
        &self,
        username: &str,
        security_answer: &str,
        new_password: &str,
    ) -> AppResult<bool> {
        if new_password.chars().count() < 3 {
            return Ok(false);
        }

        let conn = self.db.get()?;

        let Some(creds) = users::get_credentials(&conn, username)? else {
            return Ok(false);
        };

        if !verify_secret(security_answer.trim(), &creds.security_answer_hash) {
            debug!(username, "Password reset failed: wrong security answer");
            return Ok(false);
        }

        let hash = hash_secret(new_password).map_err(AppError::from)?;
        users::update_password_hash(&conn, creds.id, &hash)?;
        debug!(user_id = creds.id, "Password reset");
        Ok(true)
    }

    /// Rename the current user; refreshes the stored session username so
    /// subsequent reads see the new name.
    pub fn update_username(&self, new_username: &str) -> Result<User, AuthError> {
        let new_username = new_username.trim();
        if new_username.is_empty() {
            return Err(AuthError::Validation("Username is required".into()));
        }

        let user = self
            .current_user()?
            .ok_or(AuthError::InvalidCredentials)?;

        {
            let conn = self.db.get()?;
            if new_username != user.username && users::username_taken(&conn, new_username)? {
                return Err(AuthError::DuplicateUsername);
            }
            users::update_username(&conn, user.id, new_username)?;
        }

        self.sessions.set(user.id, new_username)?;

        Ok(User {
            id: user.id,
            username: new_username.to_string(),
        })
    }

    /// Change the current user's password after verifying the old one.
    pub fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if new_password.chars().count() < 3 {
            return Err(AuthError::Validation(
                "Password must be at least 3 characters".into(),
            ));
        }

        let user = self
            .current_user()?
            .ok_or(AuthError::InvalidCredentials)?;

        let conn = self.db.get()?;

        let creds = users::get_credentials_by_id(&conn, user.id)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_secret(current_password, &creds.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let hash = hash_secret(new_password)?;
        users::update_password_hash(&conn, user.id, &hash)?;
        Ok(())
    }
}

fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::App(AppError::Internal(format!("Password hashing failed: {e}"))))
}

/// Verify a secret against an Argon2 PHC hash.
fn verify_secret(secret: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::error!("Invalid password hash format in stored credentials");
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}
