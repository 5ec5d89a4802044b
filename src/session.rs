//! Persisted single-session store.
//!
//! The app tracks exactly one logged-in user across restarts. The record
//! lives in the database; a mutex serializes get/set/clear since nothing
//! else coordinates concurrent writers of the singleton row.

use crate::db::DbPool;
use crate::error::AppResult;
use std::sync::{Arc, Mutex};

pub use crate::db::queries::session::SessionRecord;
use crate::db::queries::session;

#[derive(Clone)]
pub struct SessionStore {
    db: DbPool,
    lock: Arc<Mutex<()>>,
}

impl SessionStore {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn get(&self) -> AppResult<Option<SessionRecord>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let conn = self.db.get()?;
        Ok(session::get_session(&conn)?)
    }

    pub fn set(&self, user_id: i64, username: &str) -> AppResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let conn = self.db.get()?;
        session::set_session(&conn, user_id, username)?;
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let conn = self.db.get()?;
        session::clear_session(&conn)?;
        Ok(())
    }
}
