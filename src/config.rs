use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub admin_chat_id: String,
    pub credentials_file: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let bot_token = env_required("TELEGRAM_BOT_TOKEN")?;
        let admin_chat_id = env_required("ADMIN_TELEGRAM_ID")?;

        let credentials_file = env_or("GOOGLE_CREDENTIALS_FILE", "./credentials.json");

        let host: IpAddr = env_or("BOOKRELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid BOOKRELAY_HOST: {e}"))?;

        // PORT is what most deploy targets set; BOOKRELAY_PORT wins if both exist.
        let port: u16 = std::env::var("BOOKRELAY_PORT")
            .or_else(|_| std::env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| format!("Invalid BOOKRELAY_PORT: {e}"))?;

        let log_level = env_or("BOOKRELAY_LOG_LEVEL", "info");

        Ok(Config {
            bot_token,
            admin_chat_id,
            credentials_file,
            host,
            port,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
