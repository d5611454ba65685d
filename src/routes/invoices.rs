use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::invoice::{create_purchase_invoice, create_sale_invoice, get_invoices};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-invoice", post(create_purchase_invoice))
        .route("/sale-invoice", post(create_sale_invoice))
        .route("/invoices", get(get_invoices))
}
