use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Apply every `.sql` file in `migrations_dir` that is not yet recorded in
/// the `_migrations` ledger. Files run in lexical filename order, each as a
/// single batch.
pub fn run_migrations(conn: &Connection, migrations_dir: &Path) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let mut paths: Vec<_> = fs::read_dir(migrations_dir)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    paths.sort();

    debug!(dir = %migrations_dir.display(), count = paths.len(), "Found migration files");

    for path in paths {
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };

        let applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = ?)",
            [name.as_str()],
            |row| row.get(0),
        )?;
        if applied {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        info!(migration = %name, "Applying migration");
        conn.execute_batch(&sql)?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?)", [name.as_str()])?;
    }

    Ok(())
}
