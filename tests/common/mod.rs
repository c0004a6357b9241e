// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use edupath::{
    config::Config,
    models::topic::TopicCatalog,
    routes,
    state::AppState,
    store::{MemoryStore, Store, seed::seed_demo_data},
};

pub const ADMIN_EMAIL: &str = "admin@edupath.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const STUDENT_PASSWORD: &str = "student123";

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        admin_password: ADMIN_PASSWORD.to_string(),
        student_password: STUDENT_PASSWORD.to_string(),
        topics: TopicCatalog::default(),
    }
}

/// Builds the app state over a freshly seeded in-memory store.
pub async fn seeded_state() -> AppState {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed_demo_data(store.as_ref(), ADMIN_PASSWORD, STUDENT_PASSWORD)
        .await
        .expect("Failed to seed demo data");
    AppState::new(store, test_config())
}

/// Spawns the app on a random port and returns its base URL
/// (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app() -> String {
    let app = routes::create_router(seeded_state().await);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Email no other test uses, so auto-registration starts from a clean record.
pub fn unique_email() -> String {
    format!("s_{}@student.com", &uuid::Uuid::new_v4().to_string()[..8])
}

pub async fn login(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    password: &str,
    role: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "email": email,
            "password": password,
            "role": role,
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

pub async fn token_for(
    client: &reqwest::Client,
    address: &str,
    email: &str,
    password: &str,
    role: &str,
) -> String {
    let body: serde_json::Value = login(client, address, email, password, role)
        .await
        .json()
        .await
        .expect("Failed to parse login json");
    body["token"].as_str().expect("Token not found").to_string()
}

pub async fn admin_token(client: &reqwest::Client, address: &str) -> String {
    token_for(client, address, ADMIN_EMAIL, ADMIN_PASSWORD, "admin").await
}

pub async fn student_token(client: &reqwest::Client, address: &str, email: &str) -> String {
    token_for(client, address, email, STUDENT_PASSWORD, "student").await
}
