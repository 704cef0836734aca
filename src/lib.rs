//! Rarity Service - item rarity determination over HTTP
//!
//! Accepts an item name and category on `POST /check-rarity` and answers with
//! a rarity level. Unique items are always Mythical; everything else is drawn
//! at random from the lower levels.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod rarity;
pub mod rng;
pub mod routes;
pub mod state;

pub use error::*;
pub use rarity::{RarityChecker, RarityLevel, RarityRequest, RarityResponse};
pub use routes::create_router;
pub use state::AppState;
