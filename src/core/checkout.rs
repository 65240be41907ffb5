use crate::db::ledger;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::money::fmt_amount;
use chrono::NaiveDateTime;

/// High-level business logic for the `checkout` command (multi-line sale,
/// all-or-nothing).
pub struct CheckoutLogic;

impl CheckoutLogic {
    /// Parse one `ITEM:QTY` argument.
    pub fn parse_line(raw: &str) -> AppResult<(i64, i64)> {
        let (item, qty) = raw.split_once(':').ok_or_else(|| {
            AppError::InvalidInput(format!("Malformed line '{}', expected ITEM:QTY", raw))
        })?;

        let item_id: i64 = item.trim().parse().map_err(|_| {
            AppError::InvalidInput(format!("Malformed line '{}', item must be a numeric id", raw))
        })?;
        let quantity: i64 = qty.trim().parse().map_err(|_| {
            AppError::InvalidInput(format!(
                "Malformed line '{}', quantity must be an integer",
                raw
            ))
        })?;

        Ok((item_id, quantity))
    }

    pub fn apply(
        pool: &mut DbPool,
        raw_lines: &[String],
        at: NaiveDateTime,
        currency: &str,
    ) -> AppResult<()> {
        let mut lines = Vec::with_capacity(raw_lines.len());
        for raw in raw_lines {
            lines.push(Self::parse_line(raw)?);
        }

        let receipt = ledger::record_bulk_sale(&mut pool.conn, &lines, at)?;

        audit(
            &pool.conn,
            "checkout",
            &receipt.sale_id.to_string(),
            &format!(
                "{} lines, {} units, total {:.2}",
                receipt.lines.len(),
                receipt.units(),
                receipt.total
            ),
        )?;

        println!();
        for line in &receipt.lines {
            println!(
                "  {:<25} x{:<4} @ {:>10} = {:>10}",
                line.name,
                line.quantity,
                fmt_amount(line.unit_price, currency),
                fmt_amount(line.subtotal, currency),
            );
        }
        println!();

        success(format!(
            "Sale #{} recorded: {} lines, total {}.",
            receipt.sale_id,
            receipt.lines.len(),
            fmt_amount(receipt.total, currency),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_item_and_quantity() {
        assert_eq!(CheckoutLogic::parse_line("3:2").unwrap(), (3, 2));
        assert_eq!(CheckoutLogic::parse_line(" 12 : 40 ").unwrap(), (12, 40));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(CheckoutLogic::parse_line("3").is_err());
        assert!(CheckoutLogic::parse_line("a:2").is_err());
        assert!(CheckoutLogic::parse_line("3:two").is_err());
    }
}
