// src/handlers/system.rs
use axum::{extract::State, Json};
use serde_json::json;

use crate::activity::log_activity;
use crate::dtos::response::{ok_message, MessageResponse};
use crate::error::AppError;
use crate::models::activity::ActivityKind;
use crate::models::medicine::{Category, Medicine};
use crate::state::AppState;

/// The nine-item starter catalog, spanning all three categories.
fn sample_medicines() -> Vec<Medicine> {
    [
        ("medicine:1", "باراسيتامول 500 مجم", 25, Category::Medicines),
        ("medicine:2", "أموكسيسيلين 250 مجم", 8, Category::Medicines),
        ("medicine:3", "فيتامين سي 1000 مجم", 18, Category::Vega),
        ("medicine:4", "إيبوبروفين 200 مجم", 5, Category::Medicines),
        ("medicine:5", "أوميجا 3", 12, Category::Vega),
        ("medicine:6", "شراب الكحة للأطفال", 3, Category::Medicines),
        ("medicine:7", "جرين كوفي للتخسيس", 15, Category::Slimming),
        ("medicine:8", "كبسولات حرق الدهون", 7, Category::Slimming),
        ("medicine:9", "فيتامينات متعددة للنساء", 20, Category::Vega),
    ]
    .into_iter()
    .map(|(id, name, quantity, category)| {
        Medicine::new(
            id.to_string(),
            name.to_string(),
            quantity,
            "علبة".to_string(),
            category,
        )
    })
    .collect()
}

// GET /init-data - Seed the catalog on first run; no-op afterwards
pub async fn init_data(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let existing = state.store.get_by_prefix(Medicine::KEY_PREFIX).await?;
    if existing.is_empty() {
        let medicines = sample_medicines();
        for medicine in &medicines {
            state
                .store
                .set(&medicine.id, serde_json::to_value(medicine)?)
                .await?;
        }

        log_activity(
            state.store.as_ref(),
            ActivityKind::SystemInit,
            "تم تهيئة البيانات الأولية للنظام مع الفئات",
            json!({
                "medicinesCount": medicines.len(),
                "categories": ["أدوية", "فيجا", "تخسيس"],
            }),
        )
        .await;
    }

    Ok(ok_message("تم تهيئة البيانات بنجاح"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::activity::Activity;
    use crate::store::memory::MemoryKvStore;

    #[tokio::test]
    async fn seeding_twice_is_idempotent() {
        let state = AppState::new(Arc::new(MemoryKvStore::new()));

        init_data(State(state.clone())).await.unwrap();
        init_data(State(state.clone())).await.unwrap();

        let medicines = state
            .store
            .get_by_prefix(Medicine::KEY_PREFIX)
            .await
            .unwrap();
        assert_eq!(medicines.len(), 9);

        let activities: Vec<Activity> = state
            .store
            .get_by_prefix(Activity::KEY_PREFIX)
            .await
            .unwrap()
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap())
            .collect();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].kind, ActivityKind::SystemInit);
    }

    #[tokio::test]
    async fn seeded_items_respect_the_low_stock_invariant() {
        let state = AppState::new(Arc::new(MemoryKvStore::new()));
        init_data(State(state.clone())).await.unwrap();

        let medicines: Vec<Medicine> = state
            .store
            .get_by_prefix(Medicine::KEY_PREFIX)
            .await
            .unwrap()
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap())
            .collect();

        assert_eq!(medicines.len(), 9);
        for medicine in &medicines {
            assert_eq!(medicine.low_stock, medicine.quantity < 10);
        }
        assert_eq!(
            medicines.iter().filter(|m| m.low_stock).count(),
            4 // quantities 8, 5, 3 and 7
        );
    }

    #[tokio::test]
    async fn seeding_a_populated_catalog_changes_nothing() {
        let state = AppState::new(Arc::new(MemoryKvStore::new()));
        let medicine = Medicine::new(
            "medicine:custom".to_string(),
            "دواء موجود".to_string(),
            2,
            "علبة".to_string(),
            Category::Medicines,
        );
        state
            .store
            .set(&medicine.id, serde_json::to_value(&medicine).unwrap())
            .await
            .unwrap();

        init_data(State(state.clone())).await.unwrap();

        let medicines = state
            .store
            .get_by_prefix(Medicine::KEY_PREFIX)
            .await
            .unwrap();
        assert_eq!(medicines.len(), 1);
    }
}
