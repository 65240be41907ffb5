use crate::errors::{AppError, AppResult};
use crate::export::model::SaleLineExport;
use std::fs;

/// Write the flattened sale lines as pretty-printed JSON.
pub fn write_json(path: &str, rows: &[SaleLineExport]) -> AppResult<()> {
    let json =
        serde_json::to_string_pretty(rows).map_err(|e| AppError::Export(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}
