// src/dtos/invoice.rs
use serde::{Deserialize, Serialize};

use crate::models::invoice::{Invoice, InvoiceLineItem};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInvoiceRequest {
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
    pub total: f64,
    pub supplier_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleInvoiceRequest {
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
    pub total: f64,
    pub customer_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub medicine_id: String,
    #[serde(default)]
    pub medicine_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub unit: String,
    pub unit_price: f64,
}

impl From<LineItemRequest> for InvoiceLineItem {
    fn from(item: LineItemRequest) -> Self {
        Self {
            medicine_id: item.medicine_id,
            medicine_name: item.medicine_name,
            quantity: item.quantity,
            unit: item.unit,
            unit_price: item.unit_price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InvoiceList {
    pub purchases: Vec<Invoice>,
    pub sales: Vec<Invoice>,
    pub all: Vec<Invoice>,
}
