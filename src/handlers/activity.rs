// src/handlers/activity.rs
use axum::{extract::State, Json};

use crate::dtos::response::{ok, DataResponse};
use crate::error::AppError;
use crate::models::activity::Activity;
use crate::state::AppState;

// GET /activities - Audit log, newest first
pub async fn get_activities(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Activity>>>, AppError> {
    let values = state.store.get_by_prefix(Activity::KEY_PREFIX).await?;
    let mut activities = values
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Activity>, _>>()?;
    activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(ok(activities))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use serde_json::json;

    use crate::models::activity::ActivityKind;
    use crate::store::memory::MemoryKvStore;

    #[tokio::test]
    async fn listing_is_sorted_by_timestamp_descending() {
        let state = AppState::new(Arc::new(MemoryKvStore::new()));
        let base = Utc::now();

        for (offset, id) in [(2, "activity:1"), (0, "activity:2"), (1, "activity:3")] {
            let activity = Activity {
                id: id.to_string(),
                kind: ActivityKind::QuantityUpdated,
                description: "تم تحديث كمية".to_string(),
                details: json!({}),
                timestamp: base + Duration::seconds(offset),
                user_id: "user1".to_string(),
            };
            state
                .store
                .set(id, serde_json::to_value(&activity).unwrap())
                .await
                .unwrap();
        }

        let listed = get_activities(State(state)).await.unwrap().0.data;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].id, "activity:1");
        assert_eq!(listed[1].id, "activity:3");
        assert_eq!(listed[2].id, "activity:2");
    }
}
