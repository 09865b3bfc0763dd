use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{Embedder, TextGenerator};
use crate::store::MarketplaceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Marketplace records. Default: `PgMarketplaceStore`.
    pub store: Arc<dyn MarketplaceStore>,
    /// Generation backend for skill extraction. Default: `OllamaClient`.
    pub generator: Arc<dyn TextGenerator>,
    /// Embedding backend for resume chunk retrieval. Default: `OllamaClient`.
    pub embedder: Arc<dyn Embedder>,
    pub config: Config,
}
