pub mod client;

use async_trait::async_trait;

#[derive(Debug)]
pub struct AppendError {
    pub message: String,
}

impl std::fmt::Display for AppendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for AppendError {
    fn from(s: String) -> Self {
        AppendError { message: s }
    }
}

/// Append-only row sink. One call per accepted booking; rows are never read
/// back or updated from here.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn append(&self, row: Vec<String>) -> Result<(), AppendError>;
}
