use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quantity below which an item is flagged for reorder attention.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    #[serde(rename = "أدوية")]
    Medicines,
    #[serde(rename = "فيجا")]
    Vega,
    #[serde(rename = "تخسيس")]
    Slimming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub category: Category,
    pub low_stock: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Medicine {
    pub const KEY_PREFIX: &'static str = "medicine:";

    pub fn new(id: String, name: String, quantity: i64, unit: String, category: Category) -> Self {
        Self {
            id,
            name,
            quantity,
            unit,
            category,
            low_stock: quantity < LOW_STOCK_THRESHOLD,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Every quantity change goes through here so `low_stock` stays derived
    /// from the current quantity.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.low_stock = quantity < LOW_STOCK_THRESHOLD;
        self.updated_at = Some(Utc::now());
    }
}
