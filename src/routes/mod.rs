pub mod booking;
pub mod parser;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new().route("/api/booking", post(booking::submit))
}
