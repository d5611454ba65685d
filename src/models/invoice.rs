use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    Purchase,
    Sale,
}

impl InvoiceType {
    pub fn key_prefix(self) -> &'static str {
        match self {
            InvoiceType::Purchase => "purchase:",
            InvoiceType::Sale => "sale:",
        }
    }
}

/// One invoice row. `medicine_name` is a snapshot taken at posting time and
/// survives later renames or deletion of the catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub medicine_id: String,
    pub medicine_name: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: f64,
}

/// Immutable once posted; corrections go through the catalog, never back
/// through the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    pub items: Vec<InvoiceLineItem>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
