// src/handlers/medicine.rs
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::activity::log_activity;
use crate::dtos::medicine::{CreateMedicineRequest, UpdateMedicineRequest};
use crate::dtos::response::{ok, ok_message, DataResponse, MessageResponse};
use crate::error::AppError;
use crate::models::activity::ActivityKind;
use crate::models::medicine::Medicine;
use crate::state::AppState;
use crate::store::timestamped_key;

// GET /medicines - List the whole catalog
#[instrument(skip(state))]
pub async fn get_medicines(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Medicine>>>, AppError> {
    let values = state.store.get_by_prefix(Medicine::KEY_PREFIX).await?;
    let medicines = values
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Medicine>, _>>()?;
    Ok(ok(medicines))
}

// POST /medicines - Add a catalog item
#[instrument(skip(state, payload))]
pub async fn create_medicine(
    State(state): State<AppState>,
    Json(payload): Json<CreateMedicineRequest>,
) -> Result<Json<DataResponse<Medicine>>, AppError> {
    let name = payload.name.filter(|name| !name.trim().is_empty());
    let unit = payload.unit.filter(|unit| !unit.trim().is_empty());
    let (name, unit, quantity) = match (name, unit, payload.quantity) {
        (Some(name), Some(unit), Some(quantity)) => (name, unit, quantity),
        _ => return Err(AppError::validation("بيانات الدواء غير مكتملة")),
    };
    if quantity < 0 {
        return Err(AppError::validation("الكمية لا يمكن أن تكون سالبة"));
    }

    let medicine = Medicine::new(
        timestamped_key(Medicine::KEY_PREFIX),
        name,
        quantity,
        unit,
        payload.category.unwrap_or_default(),
    );
    state
        .store
        .set(&medicine.id, serde_json::to_value(&medicine)?)
        .await?;

    log_activity(
        state.store.as_ref(),
        ActivityKind::MedicineAdded,
        format!("تم إضافة دواء جديد: {}", medicine.name),
        json!({
            "medicineId": medicine.id,
            "name": medicine.name,
            "quantity": medicine.quantity,
            "unit": medicine.unit,
            "category": medicine.category,
        }),
    )
    .await;

    Ok(ok(medicine))
}

// PUT /medicines/{id} - Partial update
#[instrument(skip(state, payload), fields(id))]
pub async fn update_medicine(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateMedicineRequest>,
) -> Result<Json<DataResponse<Medicine>>, AppError> {
    let value = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found("الدواء غير موجود"))?;
    let existing: Medicine = serde_json::from_value(value)?;

    let name = payload.name.filter(|name| !name.trim().is_empty());
    if matches!(payload.quantity, Some(q) if q < 0) {
        return Err(AppError::validation("الكمية لا يمكن أن تكون سالبة"));
    }

    let mut updated = existing.clone();
    if let Some(ref name) = name {
        updated.name = name.clone();
    }
    if let Some(category) = payload.category {
        updated.category = category;
    }
    // Recomputes low_stock even when the quantity is untouched, and stamps
    // updated_at either way.
    updated.set_quantity(payload.quantity.unwrap_or(existing.quantity));

    state
        .store
        .set(&id, serde_json::to_value(&updated)?)
        .await?;

    // At most one audit record per call; a name/category edit wins over a
    // quantity change, and its snapshots still carry the new quantity.
    if name.is_some() || payload.category.is_some() {
        log_activity(
            state.store.as_ref(),
            ActivityKind::MedicineUpdated,
            format!("تم تعديل الدواء: {}", updated.name),
            json!({
                "medicineId": id,
                "oldData": &existing,
                "newData": &updated,
            }),
        )
        .await;
    } else if let Some(quantity) = payload.quantity {
        log_activity(
            state.store.as_ref(),
            ActivityKind::QuantityUpdated,
            format!("تم تحديث كمية {}", existing.name),
            json!({
                "medicineId": id,
                "oldQuantity": existing.quantity,
                "newQuantity": quantity,
                "difference": quantity - existing.quantity,
            }),
        )
        .await;
    }

    Ok(ok(updated))
}

// DELETE /medicines/{id} - Remove outright, no tombstone
#[instrument(skip(state), fields(id))]
pub async fn delete_medicine(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let value = state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| AppError::not_found("الدواء غير موجود"))?;
    let existing: Medicine = serde_json::from_value(value)?;

    state.store.delete(&id).await?;

    log_activity(
        state.store.as_ref(),
        ActivityKind::MedicineDeleted,
        format!("تم حذف الدواء: {}", existing.name),
        json!({
            "medicineId": id,
            "deletedMedicine": &existing,
        }),
    )
    .await;

    Ok(ok_message("تم حذف الدواء بنجاح"))
}
