pub mod activities;
pub mod invoices;
pub mod medicines;
pub mod system;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(medicines::routes())
        .merge(invoices::routes())
        .merge(activities::routes())
        .merge(system::routes())
}
