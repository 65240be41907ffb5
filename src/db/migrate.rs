use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `items` table has a `status` column.
fn items_has_status_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('items')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "status" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the catalog and ledger tables with the modern schema.
fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            barcode      TEXT UNIQUE,
            name         TEXT NOT NULL,
            description  TEXT NOT NULL DEFAULT '',
            stock        INTEGER NOT NULL DEFAULT 0 CHECK(stock >= 0),
            min_stock    INTEGER NOT NULL DEFAULT 0 CHECK(min_stock >= 0),
            price        REAL NOT NULL DEFAULT 0 CHECK(price >= 0),
            status       TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','disabled')),
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sales (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            date         TEXT NOT NULL,
            time         TEXT NOT NULL,
            created_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sale_lines (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            sale_id      INTEGER NOT NULL REFERENCES sales(id),
            item_id      INTEGER NOT NULL REFERENCES items(id),
            quantity     INTEGER NOT NULL CHECK(quantity > 0),
            unit_price   REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sales_date ON sales(date);
        CREATE INDEX IF NOT EXISTS idx_sale_lines_sale ON sale_lines(sale_id);
        CREATE INDEX IF NOT EXISTS idx_sale_lines_item ON sale_lines(item_id);
        "#,
    )?;
    Ok(())
}

/// Migrate an items table created before soft-delete support.
fn migrate_add_status_column(conn: &Connection) -> Result<(), Error> {
    let version = "20250412_0009_add_item_status";

    // 1) Skip if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if items_has_status_column(conn)? {
        // Fresh schema already carries the column; just record the version.
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Schema already current')",
            [version],
        )?;
        return Ok(());
    }

    // 2) Apply
    conn.execute(
        "ALTER TABLE items ADD COLUMN status TEXT NOT NULL DEFAULT 'active';",
        [],
    )
    .map_err(|e| {
        Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some(format!("Failed to add 'status' column: {}", e)),
        )
    })?;

    // 3) Mark as applied
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added status flag to items')",
        [version],
    )?;

    success(format!(
        "Migration applied: {} → added 'status' to items table",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Ensure catalog/ledger tables
    let fresh = !table_exists(conn, "items")?;
    create_tables(conn)?;
    if fresh {
        success("Created items, sales and sale_lines tables (modern schema).");
    }

    // 3) Tracked column migrations
    migrate_add_status_column(conn)?;

    Ok(())
}

/// Run PRAGMA integrity_check and report the result.
pub fn integrity_check(conn: &Connection) -> Result<bool> {
    let verdict: String = conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    Ok(verdict == "ok")
}
