use serde::Serialize;

/// Catalog item lifecycle state.
///
/// Items are never hard-deleted once they have ledger history: a `disable`
/// flips the status and the row stays referenced by past sale lines.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ItemStatus {
    Active,
    Disabled,
}

impl ItemStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Disabled => "disabled",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ItemStatus::Active),
            "disabled" => Some(ItemStatus::Disabled),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ItemStatus::Active)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: i64,
    pub barcode: Option<String>, // ⇔ items.barcode (TEXT UNIQUE, nullable)
    pub name: String,            // ⇔ items.name
    pub description: String,     // ⇔ items.description
    pub stock: i64,              // ⇔ items.stock (INT >= 0)
    pub min_stock: i64,          // ⇔ items.min_stock (alert threshold)
    pub price: f64,              // ⇔ items.price (REAL >= 0)
    pub status: ItemStatus,      // ⇔ items.status ('active' | 'disabled')
    pub created_at: String,      // ⇔ items.created_at (TEXT, ISO8601)
}

impl Item {
    /// Barcode or the placeholder used wherever a sku must be shown.
    pub fn sku(&self) -> &str {
        self.barcode.as_deref().unwrap_or("N/A")
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= self.min_stock
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Partial update for an item.
///
/// Every field is optional: `None` means "leave unchanged". The patch is
/// applied to a freshly read row and the merged row is validated before a
/// single full-row UPDATE is issued, so no statement is ever assembled from
/// whichever fields a request happens to carry.
#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub barcode: Option<Option<String>>, // Some(None) clears the barcode
    pub name: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub price: Option<f64>,
    pub status: Option<ItemStatus>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.barcode.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.stock.is_none()
            && self.min_stock.is_none()
            && self.price.is_none()
            && self.status.is_none()
    }

    /// Merge the patch into `item`, field by field.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(barcode) = &self.barcode {
            item.barcode = barcode.clone();
        }
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(stock) = self.stock {
            item.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(status) = self.status {
            item.status = status;
        }
    }
}
