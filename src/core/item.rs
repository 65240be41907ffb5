use crate::core::validate;
use crate::db::catalog;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::item::{Item, ItemPatch, ItemStatus};
use crate::ui::messages::success;
use crate::utils::colors::{RESET, color_for_stock, colorize_optional};
use crate::utils::money::{fmt_amount, round2};
use crate::utils::table::{Column, Table};
use chrono::Local;

/// High-level business logic for the `item` subcommands.
pub struct ItemLogic;

impl ItemLogic {
    pub fn add(
        pool: &mut DbPool,
        name: &str,
        barcode: Option<&str>,
        description: Option<&str>,
        stock: i64,
        min_stock: i64,
        price: f64,
    ) -> AppResult<i64> {
        let item = Item {
            id: 0,
            barcode: barcode.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()),
            name: name.trim().to_string(),
            description: description.unwrap_or("").trim().to_string(),
            stock,
            min_stock,
            price: round2(price),
            status: ItemStatus::Active,
            created_at: Local::now().to_rfc3339(),
        };

        validate::validate_item(&item)?;

        if let Some(barcode) = &item.barcode
            && catalog::get_by_barcode(&pool.conn, barcode)?.is_some()
        {
            return Err(AppError::Validation {
                field: "barcode".to_string(),
                message: format!("Barcode '{}' already exists", barcode),
            });
        }

        let id = catalog::insert_item(&pool.conn, &item)?;
        audit(
            &pool.conn,
            "item_add",
            &id.to_string(),
            &format!("Added item '{}'", item.name),
        )?;

        success(format!("Added item #{}: {}.", id, item.name));
        Ok(id)
    }

    /// Apply a partial edit: read the row, merge the patch in memory,
    /// validate the result, write the full row back.
    pub fn edit(pool: &mut DbPool, ident: &str, patch: &ItemPatch) -> AppResult<()> {
        if patch.is_empty() {
            return Err(AppError::InvalidInput(
                "Nothing to do: specify at least one field to change.".to_string(),
            ));
        }

        let mut item = catalog::resolve(&pool.conn, ident)?;
        patch.apply_to(&mut item);
        validate::validate_item(&item)?;

        if let Some(barcode) = &item.barcode
            && let Some(other) = catalog::get_by_barcode(&pool.conn, barcode)?
            && other.id != item.id
        {
            return Err(AppError::Validation {
                field: "barcode".to_string(),
                message: format!("Barcode '{}' already exists", barcode),
            });
        }

        catalog::update_item(&pool.conn, &item)?;
        audit(
            &pool.conn,
            "item_edit",
            &item.id.to_string(),
            &format!("Updated item '{}'", item.name),
        )?;

        success(format!("Updated item #{}: {}.", item.id, item.name));
        Ok(())
    }

    /// Soft delete: flip status, keep the row for ledger history.
    pub fn set_status(pool: &mut DbPool, ident: &str, status: ItemStatus) -> AppResult<()> {
        let mut item = catalog::resolve(&pool.conn, ident)?;

        if item.status == status {
            return Err(AppError::InvalidInput(format!(
                "Item '{}' is already {}",
                item.name,
                status.to_db_str()
            )));
        }

        item.status = status;
        catalog::update_item(&pool.conn, &item)?;
        audit(
            &pool.conn,
            "item_status",
            &item.id.to_string(),
            &format!("Item '{}' set to {}", item.name, status.to_db_str()),
        )?;

        success(format!(
            "Item #{} ({}) is now {}.",
            item.id,
            item.name,
            status.to_db_str()
        ));
        Ok(())
    }

    pub fn list(pool: &mut DbPool, low_only: bool, all: bool, currency: &str) -> AppResult<()> {
        let items = if low_only {
            catalog::list_below_threshold(pool)?
        } else {
            catalog::list_items(pool, all)?
        };

        if items.is_empty() {
            println!("No items found.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("ID", 5),
            Column::left("BARCODE", 14),
            Column::left("NAME", 25),
            Column::right("STOCK", 6),
            Column::right("MIN", 5),
            Column::right("PRICE", 10),
            Column::left("STATUS", 8),
        ]);

        for item in &items {
            let stock_color = color_for_stock(item.stock, item.min_stock);
            table.add_row(vec![
                item.id.to_string(),
                colorize_optional(item.sku()),
                item.name.clone(),
                format!("{}{}{}", stock_color, item.stock, RESET),
                item.min_stock.to_string(),
                fmt_amount(item.price, currency),
                item.status.to_db_str().to_string(),
            ]);
        }

        print!("{}", table.render());
        Ok(())
    }
}
