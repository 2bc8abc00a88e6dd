use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::booking::BookingSubmission;
use crate::error::AppError;
use crate::notify;
use crate::state::SharedState;

use super::parser;

pub const SUCCESS_MESSAGE: &str = "Спасибо за заявку в Скейткласс, мы скоро свяжемся с вами!";

/// Accept one booking: validate, append the row, notify the admin.
///
/// The two side effects run strictly in sequence and are not transactional.
/// If the append succeeds but delivery fails, the row stays in the sheet and
/// the caller still gets a 500.
pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let payload = parser::parse_body(content_type, &body).map_err(AppError::Validation)?;
    let submission = BookingSubmission::from_payload(&payload)?;

    state
        .store
        .append(submission.to_row())
        .await
        .map_err(|e| AppError::Append(e.message))?;

    let message = notify::format_notification(&submission);
    state
        .notifier
        .send(&message)
        .await
        .map_err(|e| AppError::Notify(e.message))?;

    tracing::info!("Booking accepted for {}", submission.name);

    Ok(Json(json!({
        "success": true,
        "message": SUCCESS_MESSAGE,
    })))
}
