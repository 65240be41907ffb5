use crate::models::sale::SaleWithLines;
use serde::Serialize;

/// One exported row: a sale line flattened with its sale header.
#[derive(Debug, Clone, Serialize)]
pub struct SaleLineExport {
    pub sale_id: i64,
    pub date: String,
    pub time: String,
    pub item_id: i64,
    pub item: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
}

/// Flatten sales into one row per line.
pub fn flatten(sales: &[SaleWithLines]) -> Vec<SaleLineExport> {
    let mut out = Vec::new();
    for sale in sales {
        for line in &sale.lines {
            out.push(SaleLineExport {
                sale_id: sale.sale.id,
                date: sale.sale.date_str(),
                time: sale.sale.time_str(),
                item_id: line.item_id,
                item: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            });
        }
    }
    out
}
