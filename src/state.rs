//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::rarity::RarityChecker;
use crate::rng::RandomSource;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub rarity: RarityChecker,
}

impl AppState {
    /// Creates application state around the given randomness source.
    pub fn new(config: AppConfig, source: Arc<dyn RandomSource>) -> Self {
        Self {
            config: Arc::new(config),
            rarity: RarityChecker::new(source),
        }
    }
}
