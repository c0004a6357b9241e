// src/main.rs

use std::sync::Arc;

use dotenvy::dotenv;
use edupath::config::Config;
use edupath::routes;
use edupath::state::AppState;
use edupath::store::{MemoryStore, SqliteStore, Store, seed::seed_demo_data};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "edupath.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = SqliteStore::connect(url)
                .await
                .expect("Failed to open SQLite store");
            tracing::info!("Using SQLite store at {}", url);
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, data will be kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    if let Err(e) = seed_demo_data(
        store.as_ref(),
        &config.admin_password,
        &config.student_password,
    )
    .await
    {
        tracing::error!("Failed to seed demo data: {:?}", e);
    }

    tracing::info!(topics = config.topics.len(), "Topic catalog loaded");

    let addr = config.bind_addr;
    let state = AppState::new(store, config);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
