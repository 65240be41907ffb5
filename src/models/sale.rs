use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// One checkout event. Immutable once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub id: i64,
    pub date: NaiveDate,    // ⇔ sales.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,    // ⇔ sales.time (TEXT "HH:MM:SS")
    pub created_at: String, // ⇔ sales.created_at (TEXT, ISO8601)
}

impl Sale {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

/// One line of a sale, enriched with the item name.
/// `unit_price` is the price read at sale time, not a live reference.
#[derive(Debug, Clone, Serialize)]
pub struct LineReceipt {
    pub item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// What the ledger hands back after a committed sale.
#[derive(Debug, Clone, Serialize)]
pub struct SaleReceipt {
    pub sale_id: i64,
    pub lines: Vec<LineReceipt>,
    pub total: f64,
}

impl SaleReceipt {
    pub fn units(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// One sale with its lines, as listed by the history and export paths.
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithLines {
    pub sale: Sale,
    pub lines: Vec<LineReceipt>,
    pub total: f64,
}
