use axum::{routing::get, Router};

use crate::handlers::system::init_data;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/init-data", get(init_data))
}
