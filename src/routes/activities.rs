use axum::{routing::get, Router};

use crate::handlers::activity::get_activities;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/activities", get(get_activities))
}
