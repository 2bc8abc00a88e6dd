use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use bookrelay::config::Config;
use bookrelay::notify::telegram::TelegramNotifier;
use bookrelay::sheets::client::{ServiceAccountKey, SheetsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let config = Config::from_env().expect("Failed to load configuration");

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    tracing::info!("Starting bookrelay");

    let key = ServiceAccountKey::from_file(&config.credentials_file)
        .expect("Failed to load Google credentials");
    let store = Arc::new(SheetsClient::new(key));

    let notifier = Arc::new(TelegramNotifier::new(
        config.bot_token.clone(),
        config.admin_chat_id.clone(),
    ));

    let addr = SocketAddr::new(config.host, config.port);
    let app = bookrelay::build_app(config, store, notifier);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");
    tracing::info!("Health check: http://{addr}/health");
    tracing::info!("Booking endpoint: POST http://{addr}/api/booking");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
