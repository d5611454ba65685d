// src/activity.rs
use chrono::Utc;
use serde_json::Value;
use tracing::warn;

use crate::models::activity::{Activity, ActivityKind};
use crate::store::{timestamped_key, KvStore};

/// Mutations are attributed to this placeholder until real user identity
/// arrives from the gateway.
pub const DEFAULT_USER_ID: &str = "user1";

/// Appends one audit record. Best-effort: a store failure is logged and
/// swallowed, never failing the mutation that triggered it.
pub async fn log_activity(
    store: &dyn KvStore,
    kind: ActivityKind,
    description: impl Into<String>,
    details: Value,
) {
    let activity = Activity {
        id: timestamped_key(Activity::KEY_PREFIX),
        kind,
        description: description.into(),
        details,
        timestamp: Utc::now(),
        user_id: DEFAULT_USER_ID.to_string(),
    };

    let value = match serde_json::to_value(&activity) {
        Ok(value) => value,
        Err(err) => {
            warn!(?err, "Failed to encode activity record");
            return;
        }
    };

    if let Err(err) = store.set(&activity.id, value).await {
        warn!(?err, "Failed to persist activity record");
    }
}
