use chrono::Utc;
use chrono_tz::Europe::Moscow;
use serde_json::Value;

use crate::error::AppError;

/// One validated booking, immutable once built. Flows straight through to
/// the spreadsheet row and the admin notification, then is dropped.
#[derive(Debug, Clone)]
pub struct BookingSubmission {
    pub name: String,
    pub age: String,
    pub level: String,
    pub phone: String,
    pub camps: String,
    pub question: String,
    pub timestamp: String,
}

impl BookingSubmission {
    /// Validate an untyped request payload into a typed submission.
    ///
    /// Every field except `question` must be present and non-empty.
    /// Numbers are accepted for any field and rendered as decimal strings,
    /// since form posts and JSON clients disagree on how they send `age`.
    pub fn from_payload(payload: &Value) -> Result<Self, AppError> {
        let obj = payload
            .as_object()
            .ok_or_else(|| AppError::Validation("body is not an object".to_string()))?;

        let name = required_field(obj, "name")?;
        let age = required_field(obj, "age")?;
        let level = required_field(obj, "level")?;
        let phone = required_field(obj, "phone")?;
        let camps = required_field(obj, "camps")?;

        let question = obj
            .get("question")
            .and_then(as_text)
            .unwrap_or_default();

        Ok(BookingSubmission {
            name,
            age,
            level,
            phone,
            camps,
            question,
            timestamp: moscow_timestamp(),
        })
    }

    /// Row layout for the spreadsheet: timestamp first, question last.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.name.clone(),
            self.age.clone(),
            self.level.clone(),
            self.phone.clone(),
            self.camps.clone(),
            self.question.clone(),
        ]
    }
}

fn required_field(
    obj: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, AppError> {
    obj.get(key)
        .and_then(as_text)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("missing field: {key}")))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Wall clock rendered in Moscow time so the logged row is stable no matter
/// where the server runs.
pub fn moscow_timestamp() -> String {
    Utc::now()
        .with_timezone(&Moscow)
        .format("%d.%m.%Y, %H:%M:%S")
        .to_string()
}
