use crate::models::Budget;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Insert or replace the budget for (user, category). At most one budget
/// exists per category.
pub fn upsert_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
    limit: f64,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO budgets (user_id, category, limit_amount) VALUES (?, ?, ?)
         ON CONFLICT(user_id, category)
         DO UPDATE SET limit_amount = excluded.limit_amount, updated_at = datetime('now')",
        params![user_id, category, limit],
    )?;
    debug!(user_id, category, limit, "Upserted budget");
    Ok(())
}

pub fn list_budgets(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, category, limit_amount FROM budgets WHERE user_id = ? ORDER BY category",
    )?;

    let budgets = stmt
        .query_map([user_id], |row| {
            Ok(Budget {
                user_id: row.get(0)?,
                category: row.get(1)?,
                limit: row.get(2)?,
            })
        })?
        .filter_map(|b| b.ok())
        .collect();

    Ok(budgets)
}

pub fn get_budget(
    conn: &Connection,
    user_id: i64,
    category: &str,
) -> rusqlite::Result<Option<Budget>> {
    conn.query_row(
        "SELECT user_id, category, limit_amount FROM budgets WHERE user_id = ? AND category = ?",
        params![user_id, category],
        |row| {
            Ok(Budget {
                user_id: row.get(0)?,
                category: row.get(1)?,
                limit: row.get(2)?,
            })
        },
    )
    .optional()
}

/// Deleting a budget never touches expenses in that category.
pub fn delete_budget(conn: &Connection, user_id: i64, category: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "DELETE FROM budgets WHERE user_id = ? AND category = ?",
        params![user_id, category],
    )?;
    Ok(changed > 0)
}
