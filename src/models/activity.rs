use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    MedicineAdded,
    MedicineUpdated,
    QuantityUpdated,
    MedicineDeleted,
    PurchaseInvoice,
    SaleInvoice,
    SystemInit,
}

/// Append-only audit record; never revised or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub details: Value,
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
}

impl Activity {
    pub const KEY_PREFIX: &'static str = "activity:";
}
