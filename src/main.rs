// src/main.rs
mod activity;
mod dtos;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{routing::get, Router};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::fmt::init as tracing_init;

use store::postgres::PgKvStore;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Connect the key-value store
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = store::create_pool(&database_url)
        .await
        .expect("Failed to create store pool");
    store::init_schema(&pool)
        .await
        .expect("Failed to initialize kv_store schema");

    let app_state = state::AppState::new(Arc::new(PgKvStore::new(pool)));

    let api = routes::create_router()
        .route("/", get(|| async { "Saydalia API" }))
        .route("/health", get(health_check));

    // The gateway in front of this service owns the bearer credential; the
    // browser client still needs CORS headers from here.
    let app: Router = api.layer(CorsLayer::permissive()).with_state(app_state);

    // HOST/PORT env with graceful port selection
    let host_str = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let host: IpAddr = host_str
        .parse()
        .unwrap_or_else(|_| "127.0.0.1".parse().unwrap());
    let base_port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => {
                    bound = Some((l, addr));
                    break;
                }
                Err(e) => {
                    if offset == 0 {
                        tracing::warn!(%addr, error=%e, "Port in use, trying next");
                    }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
