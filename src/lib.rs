pub mod booking;
pub mod config;
pub mod error;
pub mod notify;
pub mod routes;
pub mod sheets;
pub mod state;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::notify::Notifier;
use crate::sheets::BookingStore;
use crate::state::{AppState, SharedState};

pub fn build_app(
    config: Config,
    store: Arc<dyn BookingStore>,
    notifier: Arc<dyn Notifier>,
) -> Router {
    let state: SharedState = Arc::new(AppState {
        config,
        store,
        notifier,
    });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        // The booking form is served from a different origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK" }))
}
