// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::{config::Config, models::topic::TopicCatalog, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Config,
    pub catalog: Arc<TopicCatalog>,

    /// Held across load, score and save of a student so concurrent
    /// submissions cannot overwrite each other's topic scores.
    pub score_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let catalog = Arc::new(config.topics.clone());
        Self {
            store,
            config,
            catalog,
            score_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<TopicCatalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
