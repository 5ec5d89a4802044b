use std::sync::Arc;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::auth::AuthGate;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub auth: AuthGate,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        let sessions = SessionStore::new(db.clone());
        let auth = AuthGate::new(db.clone(), sessions);
        Self {
            db,
            config: Arc::new(config),
            auth,
        }
    }

    /// Resolve the logged-in user or reject the request. Every data route
    /// goes through this so all reads and writes are scoped to one user.
    pub fn require_user(&self) -> AppResult<User> {
        self.auth
            .current_user()?
            .ok_or_else(|| AppError::Unauthorized("Not logged in".into()))
    }
}
