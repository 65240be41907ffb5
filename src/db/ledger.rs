//! Stock ledger: records a sale as one atomic transaction spanning the
//! sale header, its lines, and the stock decrement on the affected items.
//!
//! Every decision is taken on values read inside the same transaction as
//! the mutation they justify; the decrement itself re-checks the stock
//! (`AND stock >= ?`) so a lost race can never drive stock negative.

use crate::db::catalog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::item::Item;
use crate::models::sale::{LineReceipt, Sale, SaleReceipt, SaleWithLines};
use crate::utils::money::round2;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, TransactionBehavior, params};
use std::collections::BTreeMap;

/// Record a single-item sale.
///
/// `ident` resolves by barcode first, then by numeric id. The whole
/// read-check-append-decrement sequence runs in one IMMEDIATE transaction.
pub fn record_sale(
    conn: &mut Connection,
    ident: &str,
    quantity: i64,
    at: NaiveDateTime,
) -> AppResult<SaleReceipt> {
    if quantity <= 0 {
        return Err(AppError::InvalidInput(format!(
            "Quantity must be a positive integer (got {})",
            quantity
        )));
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let receipt = {
        let item = catalog::resolve(&tx, ident)?;
        check_sellable(&item, quantity)?;

        let sale_id = insert_sale(&tx, at)?;
        insert_line(&tx, sale_id, item.id, quantity, item.price)?;
        decrement_stock(&tx, &item, quantity)?;

        let line = LineReceipt {
            item_id: item.id,
            name: item.name.clone(),
            quantity,
            unit_price: item.price,
            subtotal: round2(quantity as f64 * item.price),
        };
        SaleReceipt {
            sale_id,
            total: line.subtotal,
            lines: vec![line],
        }
    };

    tx.commit()?;
    Ok(receipt)
}

/// Record a multi-line sale, all-or-nothing.
///
/// Every line is validated before any stock is touched; any failure aborts
/// the whole batch with the offending line's diagnostics. Quantities for
/// repeated item ids are summed during validation so a batch cannot
/// oversell an item across its own lines.
pub fn record_bulk_sale(
    conn: &mut Connection,
    lines: &[(i64, i64)],
    at: NaiveDateTime,
) -> AppResult<SaleReceipt> {
    if lines.is_empty() {
        return Err(AppError::InvalidInput("Empty line list".to_string()));
    }
    for (item_id, quantity) in lines {
        if *quantity <= 0 {
            return Err(AppError::InvalidInput(format!(
                "Quantity must be a positive integer (got {} for item {})",
                quantity, item_id
            )));
        }
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let receipt = {
        // 1) Validation pass: resolve every item and aggregate the
        //    requested quantity per item. Nothing is mutated yet.
        let mut items: BTreeMap<i64, Item> = BTreeMap::new();
        let mut requested: BTreeMap<i64, i64> = BTreeMap::new();

        for (item_id, quantity) in lines {
            if !items.contains_key(item_id) {
                let item = catalog::get_by_id(&tx, *item_id)?
                    .ok_or_else(|| AppError::ItemNotFound(item_id.to_string()))?;
                items.insert(*item_id, item);
            }
            *requested.entry(*item_id).or_insert(0) += quantity;
        }

        for (item_id, total) in &requested {
            let item = &items[item_id];
            check_sellable(item, *total)?;
        }

        // 2) Mutation pass: header, lines with the prices read above,
        //    one conditional decrement per distinct item.
        let sale_id = insert_sale(&tx, at)?;

        let mut receipt_lines = Vec::with_capacity(lines.len());
        for (item_id, quantity) in lines {
            let item = &items[item_id];
            insert_line(&tx, sale_id, item.id, *quantity, item.price)?;
            receipt_lines.push(LineReceipt {
                item_id: item.id,
                name: item.name.clone(),
                quantity: *quantity,
                unit_price: item.price,
                subtotal: round2(*quantity as f64 * item.price),
            });
        }

        for (item_id, total) in &requested {
            decrement_stock(&tx, &items[item_id], *total)?;
        }

        let total = round2(receipt_lines.iter().map(|l| l.subtotal).sum());
        SaleReceipt {
            sale_id,
            lines: receipt_lines,
            total,
        }
    };

    tx.commit()?;
    Ok(receipt)
}

fn check_sellable(item: &Item, quantity: i64) -> AppResult<()> {
    if !item.status.is_active() {
        return Err(AppError::InvalidInput(format!(
            "Item '{}' is disabled and cannot be sold",
            item.name
        )));
    }
    if item.stock < quantity {
        return Err(AppError::InsufficientStock {
            name: item.name.clone(),
            requested: quantity,
            available: item.stock,
        });
    }
    Ok(())
}

fn insert_sale(conn: &Connection, at: NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO sales (date, time, created_at) VALUES (?1, ?2, ?3)",
        params![
            at.format("%Y-%m-%d").to_string(),
            at.format("%H:%M:%S").to_string(),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_line(
    conn: &Connection,
    sale_id: i64,
    item_id: i64,
    quantity: i64,
    unit_price: f64,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO sale_lines (sale_id, item_id, quantity, unit_price)
         VALUES (?1, ?2, ?3, ?4)",
        params![sale_id, item_id, quantity, unit_price],
    )?;
    Ok(())
}

/// Conditional decrement: the WHERE clause re-checks the stock so the
/// update counts zero rows when another writer got there first.
fn decrement_stock(conn: &Connection, item: &Item, quantity: i64) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE items SET stock = stock - ?1 WHERE id = ?2 AND stock >= ?1",
        params![quantity, item.id],
    )?;
    if changed == 0 {
        return Err(AppError::Conflict(item.name.clone()));
    }
    Ok(())
}

/// Sales with their lines for an inclusive date range, newest first.
pub fn load_sales_between(
    pool: &mut DbPool,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<Vec<SaleWithLines>> {
    let mut stmt = pool.conn.prepare(
        "SELECT s.id, s.date, s.time, s.created_at,
                l.item_id, i.name, l.quantity, l.unit_price
         FROM sales s
         JOIN sale_lines l ON l.sale_id = s.id
         JOIN items i ON i.id = l.item_id
         WHERE s.date BETWEEN ?1 AND ?2
         ORDER BY s.date DESC, s.time DESC, s.id DESC, l.id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string()
        ],
        |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, f64>(7)?,
            ))
        },
    )?;

    let mut out: Vec<SaleWithLines> = Vec::new();
    for r in rows {
        let (sale_id, date_str, time_str, created_at, item_id, name, quantity, unit_price) = r?;

        if out.last().map(|s| s.sale.id) != Some(sale_id) {
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(date_str.clone()))?;
            let time = NaiveTime::parse_from_str(&time_str, "%H:%M:%S")
                .map_err(|_| AppError::InvalidInput(format!("Invalid time: {}", time_str)))?;
            out.push(SaleWithLines {
                sale: Sale {
                    id: sale_id,
                    date,
                    time,
                    created_at,
                },
                lines: Vec::new(),
                total: 0.0,
            });
        }

        let sale = out.last_mut().unwrap();
        let subtotal = round2(quantity as f64 * unit_price);
        sale.lines.push(LineReceipt {
            item_id,
            name,
            quantity,
            unit_price,
            subtotal,
        });
        sale.total = round2(sale.total + subtotal);
    }

    Ok(out)
}
