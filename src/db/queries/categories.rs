use rusqlite::{params, Connection};
use tracing::debug;

/// Category set seeded for every user on first use.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Others",
];

/// List the user's category set, seeding the defaults on first use so
/// subsequent reads are stable.
pub fn list_categories(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<String>> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM user_categories WHERE user_id = ?",
        [user_id],
        |row| row.get(0),
    )?;

    if count == 0 {
        debug!(user_id, "Seeding default categories");
        for name in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO user_categories (user_id, name) VALUES (?, ?)",
                params![user_id, name],
            )?;
        }
    }

    let mut stmt =
        conn.prepare("SELECT name FROM user_categories WHERE user_id = ? ORDER BY name")?;
    let names = stmt
        .query_map([user_id], |row| row.get(0))?
        .filter_map(|n| n.ok())
        .collect();

    Ok(names)
}

/// Set semantics: false when the name is already present, set unchanged.
pub fn add_category(conn: &Connection, user_id: i64, name: &str) -> rusqlite::Result<bool> {
    // Make sure the defaults exist before mutating the set.
    list_categories(conn, user_id)?;

    let inserted = conn.execute(
        "INSERT OR IGNORE INTO user_categories (user_id, name) VALUES (?, ?)",
        params![user_id, name],
    )?;
    Ok(inserted > 0)
}

/// Removes only the name from the set. Expenses and budgets referencing it
/// keep their historical label.
pub fn remove_category(conn: &Connection, user_id: i64, name: &str) -> rusqlite::Result<bool> {
    list_categories(conn, user_id)?;

    let removed = conn.execute(
        "DELETE FROM user_categories WHERE user_id = ? AND name = ?",
        params![user_id, name],
    )?;
    Ok(removed > 0)
}
