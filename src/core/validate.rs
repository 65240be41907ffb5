//! Field-level validation for catalog input.
//! Everything is checked before any statement touches the store.

use crate::errors::{AppError, AppResult};
use crate::models::item::Item;

/// Character and value limits for catalog fields.
pub struct Limits;

impl Limits {
    pub const ITEM_NAME_MAX: usize = 25;
    pub const ITEM_DESCRIPTION_MAX: usize = 200;
    pub const ITEM_BARCODE_MAX: usize = 20;
    pub const ITEM_STOCK_MAX: i64 = 10_000;
    pub const ITEM_MIN_STOCK_MAX: i64 = 1_000;
    pub const ITEM_PRICE_MAX: f64 = 1_000_000.00;
}

fn fail(field: &str, message: impl Into<String>) -> AppError {
    AppError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Trimmed, non-empty (when required), length-bounded string.
pub fn validate_string(
    field: &str,
    value: &str,
    max_length: usize,
    required: bool,
) -> AppResult<String> {
    let value = value.trim();

    if value.is_empty() {
        if required {
            return Err(fail(field, "Field is required"));
        }
        return Ok(String::new());
    }

    if value.chars().count() > max_length {
        return Err(fail(
            field,
            format!(
                "Maximum {} characters (got {})",
                max_length,
                value.chars().count()
            ),
        ));
    }

    Ok(value.to_string())
}

pub fn validate_int(field: &str, value: i64, min: i64, max: i64) -> AppResult<i64> {
    if value < min {
        return Err(fail(field, format!("Minimum value is {}", min)));
    }
    if value > max {
        return Err(fail(field, format!("Maximum value is {}", max)));
    }
    Ok(value)
}

pub fn validate_price(field: &str, value: f64) -> AppResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(fail(field, "Price must be a non-negative number"));
    }
    if value > Limits::ITEM_PRICE_MAX {
        return Err(fail(
            field,
            format!("Maximum value is {:.2}", Limits::ITEM_PRICE_MAX),
        ));
    }
    Ok(value)
}

/// Validate a full item row (fresh insert or a patched copy about to be
/// written back).
pub fn validate_item(item: &Item) -> AppResult<()> {
    validate_string("name", &item.name, Limits::ITEM_NAME_MAX, true)?;
    validate_string(
        "description",
        &item.description,
        Limits::ITEM_DESCRIPTION_MAX,
        false,
    )?;
    if let Some(barcode) = &item.barcode {
        let clean = validate_string("barcode", barcode, Limits::ITEM_BARCODE_MAX, true)?;
        if clean != *barcode {
            return Err(fail("barcode", "Barcode must not contain spaces"));
        }
    }
    validate_int("stock", item.stock, 0, Limits::ITEM_STOCK_MAX)?;
    validate_int("min_stock", item.min_stock, 0, Limits::ITEM_MIN_STOCK_MAX)?;
    validate_price("price", item.price)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::ItemStatus;

    fn sample() -> Item {
        Item {
            id: 0,
            barcode: Some("750123".to_string()),
            name: "Coffee 250g".to_string(),
            description: String::new(),
            stock: 10,
            min_stock: 2,
            price: 4.5,
            status: ItemStatus::Active,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn accepts_valid_item() {
        assert!(validate_item(&sample()).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let mut it = sample();
        it.name = "   ".to_string();
        assert!(validate_item(&it).is_err());
    }

    #[test]
    fn rejects_long_name() {
        let mut it = sample();
        it.name = "x".repeat(Limits::ITEM_NAME_MAX + 1);
        assert!(validate_item(&it).is_err());
    }

    #[test]
    fn rejects_negative_price() {
        let mut it = sample();
        it.price = -1.0;
        assert!(validate_item(&it).is_err());
    }

    #[test]
    fn rejects_stock_above_limit() {
        let mut it = sample();
        it.stock = Limits::ITEM_STOCK_MAX + 1;
        assert!(validate_item(&it).is_err());
    }

    #[test]
    fn optional_description_may_be_empty() {
        let mut it = sample();
        it.description = String::new();
        assert!(validate_item(&it).is_ok());
    }
}
