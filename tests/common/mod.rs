use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use bookrelay::config::Config;
use bookrelay::notify::{Notifier, NotifyError};
use bookrelay::sheets::{AppendError, BookingStore};

/// A running test server instance with spy collaborators instead of the
/// real Sheets and Telegram clients.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<SpyStore>,
    pub notifier: Arc<SpyNotifier>,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

/// Records every appended row; optionally fails on demand.
pub struct SpyStore {
    pub rows: Mutex<Vec<Vec<String>>>,
    fail: AtomicBool,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl BookingStore for SpyStore {
    async fn append(&self, row: Vec<String>) -> Result<(), AppendError> {
        self.calls.lock().unwrap().push("append");
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppendError::from("spy store down".to_string()));
        }
        self.rows.lock().unwrap().push(row);
        Ok(())
    }
}

/// Records every delivered message; optionally fails on demand.
pub struct SpyNotifier {
    pub messages: Mutex<Vec<String>>,
    fail: AtomicBool,
    calls: Arc<Mutex<Vec<&'static str>>>,
}

#[async_trait]
impl Notifier for SpyNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push("notify");
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::from("spy notifier down".to_string()));
        }
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a booking payload as JSON, return (body, status).
    pub async fn submit(&self, payload: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/booking"))
            .json(payload)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a booking as form-urlencoded data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/booking"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Outbound call order across both collaborators, e.g. ["append", "notify"].
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_append(&self) {
        self.store.fail.store(true, Ordering::SeqCst);
    }

    pub fn fail_notify(&self) {
        self.notifier.fail.store(true, Ordering::SeqCst);
    }
}

/// Spawn a test app on a random port with fresh spies.
pub async fn spawn_app() -> TestApp {
    let calls = Arc::new(Mutex::new(Vec::new()));

    let store = Arc::new(SpyStore {
        rows: Mutex::new(Vec::new()),
        fail: AtomicBool::new(false),
        calls: calls.clone(),
    });

    let notifier = Arc::new(SpyNotifier {
        messages: Mutex::new(Vec::new()),
        fail: AtomicBool::new(false),
        calls: calls.clone(),
    });

    let config = Config {
        bot_token: "test-token".to_string(),
        admin_chat_id: "1234567".to_string(),
        credentials_file: "./credentials.json".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        log_level: "warn".to_string(),
    };

    let app = bookrelay::build_app(config, store.clone(), notifier.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        client,
        store,
        notifier,
        calls,
    }
}

/// A payload with every required field present.
pub fn valid_payload() -> Value {
    json!({
        "name": "Ivan",
        "age": "12",
        "level": "beginner",
        "phone": "+79990000000",
        "camps": "Camp A"
    })
}
