use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::item::{Item, ItemStatus};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Item> {
    let status_str: String = row.get("status")?;
    let status = ItemStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidInput(format!(
                "Invalid status: {}",
                status_str
            ))),
        )
    })?;

    Ok(Item {
        id: row.get("id")?,
        barcode: row.get("barcode")?,
        name: row.get("name")?,
        description: row.get("description")?,
        stock: row.get("stock")?,
        min_stock: row.get("min_stock")?,
        price: row.get("price")?,
        status,
        created_at: row.get("created_at")?,
    })
}

pub fn get_by_id(conn: &Connection, id: i64) -> AppResult<Option<Item>> {
    let mut stmt = conn.prepare("SELECT * FROM items WHERE id = ?1")?;
    let item = stmt.query_row([id], map_row).optional()?;
    Ok(item)
}

pub fn get_by_barcode(conn: &Connection, barcode: &str) -> AppResult<Option<Item>> {
    let mut stmt = conn.prepare("SELECT * FROM items WHERE barcode = ?1")?;
    let item = stmt.query_row([barcode], map_row).optional()?;
    Ok(item)
}

/// Resolve a CLI identifier: barcode first, then numeric id.
pub fn resolve(conn: &Connection, ident: &str) -> AppResult<Item> {
    if let Some(item) = get_by_barcode(conn, ident)? {
        return Ok(item);
    }
    if let Ok(id) = ident.parse::<i64>()
        && let Some(item) = get_by_id(conn, id)?
    {
        return Ok(item);
    }
    Err(AppError::ItemNotFound(ident.to_string()))
}

/// Insert a new item and return its id.
pub fn insert_item(conn: &Connection, item: &Item) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO items (barcode, name, description, stock, min_stock, price, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            item.barcode,
            item.name,
            item.description,
            item.stock,
            item.min_stock,
            item.price,
            item.status.to_db_str(),
            item.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an item (all fields except id).
///
/// Always writes the full row: partial updates are merged into an `Item`
/// beforehand (see `ItemPatch::apply_to`), never assembled as dynamic SQL.
pub fn update_item(conn: &Connection, item: &Item) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE items
         SET barcode = ?1, name = ?2, description = ?3,
             stock = ?4, min_stock = ?5, price = ?6,
             status = ?7
         WHERE id = ?8",
        params![
            item.barcode,
            item.name,
            item.description,
            item.stock,
            item.min_stock,
            item.price,
            item.status.to_db_str(),
            item.id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::ItemNotFound(item.id.to_string()));
    }
    Ok(())
}

pub fn list_items(pool: &mut DbPool, include_disabled: bool) -> AppResult<Vec<Item>> {
    let sql = if include_disabled {
        "SELECT * FROM items ORDER BY id ASC"
    } else {
        "SELECT * FROM items WHERE status = 'active' ORDER BY id ASC"
    };
    let mut stmt = pool.conn.prepare(sql)?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Active items at or below their alert threshold (including sold out).
pub fn list_below_threshold(pool: &mut DbPool) -> AppResult<Vec<Item>> {
    let mut stmt = pool.conn.prepare(
        "SELECT * FROM items
         WHERE status = 'active' AND stock <= min_stock
         ORDER BY stock ASC, id ASC",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
