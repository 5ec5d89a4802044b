use rusqlite::{params, Connection, OptionalExtension};

/// The single persisted session row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: i64,
    pub username: String,
}

pub fn get_session(conn: &Connection) -> rusqlite::Result<Option<SessionRecord>> {
    conn.query_row(
        "SELECT user_id, username FROM session WHERE id = 1",
        [],
        |row| {
            Ok(SessionRecord {
                user_id: row.get(0)?,
                username: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn set_session(conn: &Connection, user_id: i64, username: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO session (id, user_id, username) VALUES (1, ?, ?)
         ON CONFLICT(id) DO UPDATE SET user_id = excluded.user_id, username = excluded.username",
        params![user_id, username],
    )?;
    Ok(())
}

pub fn clear_session(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM session WHERE id = 1", [])?;
    Ok(())
}
