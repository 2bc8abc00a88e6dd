use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Fixed texts returned to callers. Upstream causes stay in the logs.
pub const VALIDATION_MESSAGE: &str = "Все поля обязательны (кроме вопроса)";
pub const UPSTREAM_MESSAGE: &str = "Ошибка при обработке заявки. Попробуйте позже.";

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Append(String),
    Notify(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation: {msg}"),
            AppError::Append(msg) => write!(f, "Append: {msg}"),
            AppError::Notify(msg) => write!(f, "Notify: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => {
                tracing::debug!("Rejected submission: {msg}");
                (StatusCode::BAD_REQUEST, VALIDATION_MESSAGE)
            }
            AppError::Append(msg) => {
                tracing::error!("Sheets append failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_MESSAGE)
            }
            AppError::Notify(msg) => {
                tracing::error!("Telegram notify failed: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_MESSAGE)
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
