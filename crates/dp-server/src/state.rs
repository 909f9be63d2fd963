//! Application state shared across all handlers.

use std::sync::Arc;
use std::time::Instant;

use dp_core::DoppelConfig;
use dp_embed::{EmbeddingProvider, HashingEmbedder};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub config: DoppelConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: DoppelConfig) -> Self {
        let embedder = Arc::new(HashingEmbedder::new(config.embedding.dimension));
        Self {
            embedder,
            config,
            start_time: Instant::now(),
        }
    }

    /// Replace the embedding provider, keeping the rest of the state.
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = embedder;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DoppelConfig::default())
    }
}
