use std::sync::Arc;

use crate::config::Config;
use crate::notify::Notifier;
use crate::sheets::BookingStore;

pub type SharedState = Arc<AppState>;

/// Collaborators are trait objects so tests can substitute spies; the real
/// reqwest-backed clients are built once at startup.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn BookingStore>,
    pub notifier: Arc<dyn Notifier>,
}
