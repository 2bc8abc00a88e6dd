pub mod telegram;

use async_trait::async_trait;

use crate::booking::BookingSubmission;

pub const QUESTION_PLACEHOLDER: &str = "Не указан";

#[derive(Debug)]
pub struct NotifyError {
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for NotifyError {
    fn from(s: String) -> Self {
        NotifyError { message: s }
    }
}

/// One-way alert sink for the administrator. The handler does not care how
/// the message travels, only whether delivery succeeded.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Render the admin notification for one booking. Pure; the delivery channel
/// interprets the text as HTML, so every field value is escaped first.
pub fn format_notification(sub: &BookingSubmission) -> String {
    let question = if sub.question.is_empty() {
        QUESTION_PLACEHOLDER.to_string()
    } else {
        escape_html(&sub.question)
    };

    format!(
        "🎉 <b>Новая заявка на запись!</b>\n\n\
         👤 <b>Имя:</b> {name}\n\
         🎂 <b>Возраст:</b> {age}\n\
         📊 <b>Уровень:</b> {level}\n\
         📱 <b>Телефон:</b> {phone}\n\
         🏕️ <b>Скейт-кэмпы:</b> {camps}\n\
         💬 <b>Вопрос:</b> {question}\n\
         ⏰ <b>Время:</b> {timestamp}",
        name = escape_html(&sub.name),
        age = escape_html(&sub.age),
        level = escape_html(&sub.level),
        phone = escape_html(&sub.phone),
        camps = escape_html(&sub.camps),
        question = question,
        timestamp = escape_html(&sub.timestamp),
    )
}

/// Minimal escaping for Telegram HTML parse mode: only `<`, `>` and `&` are
/// significant there.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
