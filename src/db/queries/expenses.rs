use crate::models::{Expense, ExpenseUpdate, NewExpense};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        note: row.get(4)?,
        date: row.get(5)?,
        image_uri: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const EXPENSE_COLUMNS: &str =
    "id, user_id, category, amount, note, date, image_uri, created_at, updated_at";

pub fn create_expense(
    conn: &Connection,
    user_id: i64,
    expense: &NewExpense,
    date: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO expenses (user_id, category, amount, note, date, image_uri)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            user_id,
            expense.category,
            expense.amount,
            expense.note,
            date,
            expense.image_uri
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(expense_id = id, user_id, "Created expense");
    Ok(id)
}

/// All expenses for one user, newest first.
pub fn list_expenses(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<Expense>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXPENSE_COLUMNS} FROM expenses WHERE user_id = ? ORDER BY date DESC, id DESC"
    ))?;

    let expenses = stmt
        .query_map([user_id], expense_from_row)?
        .filter_map(|e| e.ok())
        .collect();

    Ok(expenses)
}

pub fn get_expense(
    conn: &Connection,
    user_id: i64,
    expense_id: i64,
) -> rusqlite::Result<Option<Expense>> {
    conn.query_row(
        &format!("SELECT {EXPENSE_COLUMNS} FROM expenses WHERE id = ? AND user_id = ?"),
        params![expense_id, user_id],
        expense_from_row,
    )
    .optional()
}

pub fn update_expense(
    conn: &Connection,
    user_id: i64,
    expense_id: i64,
    update: &ExpenseUpdate,
    date: &str,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE expenses
         SET category = ?, amount = ?, note = ?, date = ?, image_uri = ?,
             updated_at = datetime('now')
         WHERE id = ? AND user_id = ?",
        params![
            update.category,
            update.amount,
            update.note,
            date,
            update.image_uri,
            expense_id,
            user_id
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete_expense(conn: &Connection, user_id: i64, expense_id: i64) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "DELETE FROM expenses WHERE id = ? AND user_id = ?",
        params![expense_id, user_id],
    )?;
    Ok(changed > 0)
}

pub fn clear_expenses(conn: &Connection, user_id: i64) -> rusqlite::Result<usize> {
    let deleted = conn.execute("DELETE FROM expenses WHERE user_id = ?", [user_id])?;
    debug!(user_id, count = deleted, "Cleared expenses");
    Ok(deleted)
}

/// Sum of a user's spend in one category, optionally excluding a single
/// expense (the one being edited).
pub fn category_total(
    conn: &Connection,
    user_id: i64,
    category: &str,
    exclude_expense_id: Option<i64>,
) -> rusqlite::Result<f64> {
    match exclude_expense_id {
        Some(exclude) => conn.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM expenses WHERE user_id = ? AND category = ? AND id != ?",
            params![user_id, category, exclude],
            |row| row.get(0),
        ),
        None => conn.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM expenses WHERE user_id = ? AND category = ?",
            params![user_id, category],
            |row| row.get(0),
        ),
    }
}
