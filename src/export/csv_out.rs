use crate::export::model::SaleLineExport;
use csv::Writer;

/// Write the flattened sale lines as CSV.
pub fn write_csv(path: &str, rows: &[SaleLineExport]) -> std::io::Result<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "sale_id",
        "date",
        "time",
        "item_id",
        "item",
        "quantity",
        "unit_price",
        "subtotal",
    ])?;

    for row in rows {
        wtr.write_record(&[
            row.sale_id.to_string(),
            row.date.clone(),
            row.time.clone(),
            row.item_id.to_string(),
            row.item.clone(),
            row.quantity.to_string(),
            format!("{:.2}", row.unit_price),
            format!("{:.2}", row.subtotal),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
