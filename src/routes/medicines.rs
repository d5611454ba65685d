use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers::medicine::{create_medicine, delete_medicine, get_medicines, update_medicine};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/medicines", get(get_medicines).post(create_medicine))
        .route(
            "/medicines/{id}",
            put(update_medicine).delete(delete_medicine),
        )
}
