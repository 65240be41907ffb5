//! Read-only aggregation queries for the metrics report.
//! Each KPI comes from a single query's own result set; nothing in this
//! module mutates the store.

use crate::errors::AppResult;
use crate::models::report::TopProduct;
use chrono::NaiveDate;
use rusqlite::{Connection, params};

fn d(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Revenue, distinct sale count and units sold for an inclusive range.
pub fn kpis(conn: &Connection, start: NaiveDate, end: NaiveDate) -> AppResult<(f64, i64, i64)> {
    let row = conn.query_row(
        "SELECT IFNULL(SUM(l.quantity * l.unit_price), 0.0),
                COUNT(DISTINCT s.id),
                IFNULL(SUM(l.quantity), 0)
         FROM sales s
         JOIN sale_lines l ON l.sale_id = s.id
         WHERE s.date BETWEEN ?1 AND ?2",
        params![d(start), d(end)],
        |row| {
            Ok((
                row.get::<_, f64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        },
    )?;
    Ok(row)
}

/// Per-day revenue and sale count, only for days that had sales.
/// Dense seeding over the window happens in core::metrics.
pub fn revenue_by_day(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<(String, f64, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT s.date,
                SUM(l.quantity * l.unit_price),
                COUNT(DISTINCT s.id)
         FROM sales s
         JOIN sale_lines l ON l.sale_id = s.id
         WHERE s.date BETWEEN ?1 AND ?2
         GROUP BY s.date
         ORDER BY s.date ASC",
    )?;

    let rows = stmt.query_map(params![d(start), d(end)], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Top items by units sold in range. Ties break on item id for a stable
/// order.
pub fn top_products(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    limit: i64,
) -> AppResult<Vec<TopProduct>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.name, i.barcode,
                SUM(l.quantity) AS units,
                SUM(l.quantity * l.unit_price) AS revenue
         FROM sale_lines l
         JOIN sales s ON s.id = l.sale_id
         JOIN items i ON i.id = l.item_id
         WHERE s.date BETWEEN ?1 AND ?2
         GROUP BY i.id, i.name, i.barcode
         ORDER BY units DESC, i.id ASC
         LIMIT ?3",
    )?;

    let rows = stmt.query_map(params![d(start), d(end), limit], |row| {
        let barcode: Option<String> = row.get(2)?;
        Ok(TopProduct {
            item_id: row.get(0)?,
            name: row.get(1)?,
            sku: barcode.unwrap_or_else(|| "N/A".to_string()),
            units: row.get(3)?,
            revenue: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct sales and revenue per store-native weekday number
/// (`strftime('%w')`, 0 = Sunday). Remapping to Monday-first buckets is
/// the caller's job via `utils::date::weekday_monday_first`.
pub fn sales_by_weekday(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<(u32, i64, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT CAST(strftime('%w', s.date) AS INTEGER) AS wd,
                COUNT(DISTINCT s.id),
                IFNULL(SUM(l.quantity * l.unit_price), 0.0)
         FROM sales s
         JOIN sale_lines l ON l.sale_id = s.id
         WHERE s.date BETWEEN ?1 AND ?2
         GROUP BY wd",
    )?;

    let rows = stmt.query_map(params![d(start), d(end)], |row| {
        Ok((
            row.get::<_, u32>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Distinct sales per hour of day (0-23).
pub fn sales_by_hour(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<(u32, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT CAST(substr(time, 1, 2) AS INTEGER) AS hour, COUNT(*)
         FROM sales
         WHERE date BETWEEN ?1 AND ?2
         GROUP BY hour",
    )?;

    let rows = stmt.query_map(params![d(start), d(end)], |row| {
        Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Count of active items with stock == 0.
pub fn count_out_of_stock(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM items WHERE status = 'active' AND stock = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Count of active items with 0 < stock <= min_stock.
pub fn count_low_stock(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM items
         WHERE status = 'active' AND stock > 0 AND stock <= min_stock",
        [],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Count of active items with zero ledger activity since `since`
/// (inclusive).
pub fn count_no_movement(conn: &Connection, since: NaiveDate) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM items i
         WHERE i.status = 'active'
           AND NOT EXISTS (
               SELECT 1 FROM sale_lines l
               JOIN sales s ON s.id = l.sale_id
               WHERE l.item_id = i.id AND s.date >= ?1
           )",
        [d(since)],
        |row| row.get(0),
    )?;
    Ok(n)
}
