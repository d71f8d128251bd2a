use std::sync::Arc;

use crate::scoring::ScoringEngine;
use crate::store::JobRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built from `Config::scoring_weights` after validation.
    pub engine: ScoringEngine,
    /// Pluggable job store. Default: InMemoryStore.
    pub store: Arc<dyn JobRepository>,
}

#[cfg(test)]
pub fn test_state() -> AppState {
    use crate::store::InMemoryStore;

    AppState {
        engine: ScoringEngine::default(),
        store: Arc::new(InMemoryStore::new(1_000, 1_000)),
    }
}
