// src/dtos/medicine.rs
use serde::Deserialize;

use crate::models::medicine::Category;

// Every field optional so an incomplete payload surfaces as the service's
// own 400 message instead of a deserializer rejection.
#[derive(Debug, Deserialize)]
pub struct CreateMedicineRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMedicineRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub category: Option<Category>,
}
