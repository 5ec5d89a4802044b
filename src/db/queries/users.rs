use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Stored credential row for a user. Hashes are PHC strings; verification
/// happens in the auth service, never here.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub security_answer_hash: String,
}

pub fn create_user(
    conn: &Connection,
    username: &str,
    password_hash: &str,
    security_answer_hash: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (username, password_hash, security_answer_hash) VALUES (?, ?, ?)",
        params![username, password_hash, security_answer_hash],
    )?;
    let id = conn.last_insert_rowid();
    debug!(user_id = id, "Created user");
    Ok(id)
}

pub fn get_credentials(
    conn: &Connection,
    username: &str,
) -> rusqlite::Result<Option<UserCredentials>> {
    conn.query_row(
        "SELECT id, username, password_hash, security_answer_hash
         FROM users WHERE username = ?",
        [username],
        |row| {
            Ok(UserCredentials {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                security_answer_hash: row.get(3)?,
            })
        },
    )
    .optional()
}

pub fn get_credentials_by_id(
    conn: &Connection,
    user_id: i64,
) -> rusqlite::Result<Option<UserCredentials>> {
    conn.query_row(
        "SELECT id, username, password_hash, security_answer_hash
         FROM users WHERE id = ?",
        [user_id],
        |row| {
            Ok(UserCredentials {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                security_answer_hash: row.get(3)?,
            })
        },
    )
    .optional()
}

pub fn user_exists(conn: &Connection, user_id: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)",
        [user_id],
        |row| row.get(0),
    )
}

pub fn username_taken(conn: &Connection, username: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)",
        [username],
        |row| row.get(0),
    )
}

pub fn update_username(
    conn: &Connection,
    user_id: i64,
    new_username: &str,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET username = ? WHERE id = ?",
        params![new_username, user_id],
    )?;
    Ok(changed > 0)
}

pub fn update_password_hash(
    conn: &Connection,
    user_id: i64,
    password_hash: &str,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE users SET password_hash = ? WHERE id = ?",
        params![password_hash, user_id],
    )?;
    Ok(changed > 0)
}
