use async_trait::async_trait;
use serde_json::json;

use super::{Notifier, NotifyError};

/// Telegram Bot API delivery. Sends to one fixed administrator chat with
/// HTML parse mode; no polling, no updates, strictly one-way.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    admin_chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, admin_chat_id: String) -> Self {
        Self::with_api_base("https://api.telegram.org".to_string(), bot_token, admin_chat_id)
    }

    pub fn with_api_base(api_base: String, bot_token: String, admin_chat_id: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            api_base,
            bot_token,
            admin_chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);

        let resp = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.admin_chat_id,
                "text": text,
                "parse_mode": "HTML",
            }))
            .send()
            .await
            .map_err(|e| NotifyError::from(format!("sendMessage request failed: {e}")))?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await.unwrap_or(json!(null));

        if !status.is_success() || body["ok"] != json!(true) {
            let description = body["description"].as_str().unwrap_or("no description");
            return Err(NotifyError::from(format!(
                "sendMessage rejected: status {status}, {description}"
            )));
        }

        Ok(())
    }
}
