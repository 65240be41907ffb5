use crate::db::ledger;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::money::fmt_amount;
use chrono::NaiveDateTime;

/// High-level business logic for the `sell` command (single item).
pub struct SellLogic;

impl SellLogic {
    pub fn apply(
        pool: &mut DbPool,
        ident: &str,
        quantity: i64,
        at: NaiveDateTime,
        currency: &str,
    ) -> AppResult<()> {
        let receipt = ledger::record_sale(&mut pool.conn, ident, quantity, at)?;

        let line = &receipt.lines[0];
        audit(
            &pool.conn,
            "sale",
            &receipt.sale_id.to_string(),
            &format!("{} x{} = {:.2}", line.name, line.quantity, receipt.total),
        )?;

        success(format!(
            "Sale #{} recorded: {} x{} @ {} → {}.",
            receipt.sale_id,
            line.name,
            line.quantity,
            fmt_amount(line.unit_price, currency),
            fmt_amount(receipt.total, currency),
        ));
        Ok(())
    }
}
