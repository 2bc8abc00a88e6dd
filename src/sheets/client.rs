use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AppendError, BookingStore};

pub const SPREADSHEET_ID: &str = "1Q4otksgyU4bXfv-U9iWlXNty6j3cOSI0-WMaadCJpg0";
pub const APPEND_RANGE: &str = "Sheet1!A:G";

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Subset of a Google service-account key file we actually need.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read credentials file {path}: {e}"))?;
        serde_json::from_str(&raw).map_err(|e| format!("Invalid credentials file {path}: {e}"))
    }
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google Sheets values:append client authenticated with a service account.
///
/// A fresh access token is minted per append. Bookings arrive at human form
/// filling rates, so the extra token roundtrip is not worth a shared cache.
pub struct SheetsClient {
    client: reqwest::Client,
    api_base: String,
    token_uri: String,
    key: ServiceAccountKey,
    spreadsheet_id: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self::with_api_base("https://sheets.googleapis.com".to_string(), key)
    }

    pub fn with_api_base(api_base: String, key: ServiceAccountKey) -> Self {
        let token_uri = key
            .token_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_URI.to_string());
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            api_base,
            token_uri,
            key,
            spreadsheet_id: SPREADSHEET_ID.to_string(),
        }
    }

    async fn fetch_access_token(&self) -> Result<String, String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + 3600,
        };

        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| format!("Invalid service account private key: {e}"))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| format!("JWT encode failed: {e}"))?;

        let resp = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| format!("Token request failed: {e}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Token endpoint returned {status}: {body}"));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| format!("Invalid token response: {e}"))?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl BookingStore for SheetsClient {
    async fn append(&self, row: Vec<String>) -> Result<(), AppendError> {
        let token = self.fetch_access_token().await.map_err(AppendError::from)?;

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.api_base, self.spreadsheet_id, APPEND_RANGE
        );

        let resp = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| AppendError::from(format!("Append request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(1024)
                .collect::<String>();
            return Err(AppendError::from(format!(
                "Append rejected: status {status}, {body}"
            )));
        }

        Ok(())
    }
}
