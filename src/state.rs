//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::{
    config::Config,
    db::RankingStore,
    services::{KeyManager, RankingService},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Ranking engine over the configured store
    ranking: RankingService,

    /// Token keys, initialized before any request is served
    keys: KeyManager,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn RankingStore>, keys: KeyManager, config: Config) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                ranking: RankingService::new(store),
                keys,
                config,
            }),
        }
    }

    /// Get a reference to the ranking service
    pub fn ranking(&self) -> &RankingService {
        &self.inner.ranking
    }

    /// Get a reference to the token keys
    pub fn keys(&self) -> &KeyManager {
        &self.inner.keys
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
