// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

use crate::models::topic::TopicCatalog;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    pub admin_password: String,
    pub student_password: String,
    pub topics: TopicCatalog,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .map(|v| v.parse().expect("JWT_EXPIRATION must be a number of seconds"))
            .unwrap_or(86_400);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address");

        let admin_password = env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "admin123".to_string());

        let student_password = env::var("STUDENT_PASSWORD")
            .unwrap_or_else(|_| "student123".to_string());

        let topics = match env::var("TOPICS") {
            Ok(list) => TopicCatalog::new(list.split(','))
                .unwrap_or_else(|e| panic!("TOPICS is invalid: {}", e)),
            Err(_) => TopicCatalog::default(),
        };

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            admin_password,
            student_password,
            topics,
        }
    }
}
