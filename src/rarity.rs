//! Rarity determination for marketplace items.
//!
//! Items in the `unique` category, or whose name mentions "one-of-a-kind",
//! are always Mythical. Everything else gets a uniform draw over the
//! remaining levels; Mythical is deliberately left out of the draw.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rng::RandomSource;

/// Name used when the request carries no usable `name`
pub const DEFAULT_ITEM_NAME: &str = "Unknown Item";

/// Category used when the request carries no usable `category`
pub const DEFAULT_CATEGORY: &str = "General";

/// Fixed message returned with every determination
pub const RARITY_MESSAGE: &str = "Rarity determined by Java Rarity Service";

/// Category that forces Mythical (compared case-insensitively)
const UNIQUE_CATEGORY: &str = "unique";

/// Name marker that forces Mythical (matched case-insensitively)
const ONE_OF_A_KIND_MARKER: &str = "one-of-a-kind";

/// Rarity levels in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RarityLevel {
    Common,
    Uncommon,
    Rare,
    #[serde(rename = "Very Rare")]
    VeryRare,
    Mythical,
}

impl RarityLevel {
    /// Full table, Mythical last.
    pub const ALL: [RarityLevel; 5] = [
        RarityLevel::Common,
        RarityLevel::Uncommon,
        RarityLevel::Rare,
        RarityLevel::VeryRare,
        RarityLevel::Mythical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RarityLevel::Common => "Common",
            RarityLevel::Uncommon => "Uncommon",
            RarityLevel::Rare => "Rare",
            RarityLevel::VeryRare => "Very Rare",
            RarityLevel::Mythical => "Mythical",
        }
    }
}

impl fmt::Display for RarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incoming rarity check.
///
/// Decoded from a JSON object only; arrays and scalars are rejected by the
/// extractor. A field that is missing or holds a non-string value decodes to
/// `None`, and `resolve` applies the defaults. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RarityRequest {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl RarityRequest {
    pub fn new(name: Option<&str>, category: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            category: category.map(str::to_owned),
        }
    }

    /// Returns `(name, category)` with defaults applied.
    pub fn resolve(self) -> (String, String) {
        (
            self.name.unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string()),
            self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        )
    }
}

impl From<Map<String, Value>> for RarityRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            name: take_string(&mut body, "name"),
            category: take_string(&mut body, "category"),
        }
    }
}

fn take_string(body: &mut Map<String, Value>, key: &str) -> Option<String> {
    match body.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Outgoing determination, serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityResponse {
    pub item_name: String,
    pub rarity_level: RarityLevel,
    pub message: String,
}

/// Whether an item is forced to Mythical regardless of the draw.
pub fn is_override(name: &str, category: &str) -> bool {
    category.eq_ignore_ascii_case(UNIQUE_CATEGORY)
        || name.to_lowercase().contains(ONE_OF_A_KIND_MARKER)
}

/// Assigns rarity levels using an injected randomness source.
#[derive(Clone)]
pub struct RarityChecker {
    source: Arc<dyn RandomSource>,
}

impl RarityChecker {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Picks the rarity for an already-resolved name and category.
    ///
    /// The draw covers `0..ALL.len() - 1`, so Mythical only comes from the
    /// override. The source is not consulted when the override applies.
    pub fn determine(&self, name: &str, category: &str) -> RarityLevel {
        if is_override(name, category) {
            return RarityLevel::Mythical;
        }

        let levels = &RarityLevel::ALL;
        let index = self.source.uniform(0..levels.len() - 1);
        levels[index]
    }

    /// Resolves defaults, determines rarity, and builds the response.
    pub fn check(&self, request: RarityRequest) -> RarityResponse {
        let (name, category) = request.resolve();
        let rarity = self.determine(&name, &category);

        tracing::info!(
            item_name = %name,
            category = %category,
            rarity = %rarity,
            "Received for rarity check"
        );

        RarityResponse {
            item_name: name,
            rarity_level: rarity,
            message: RARITY_MESSAGE.to_string(),
        }
    }
}

impl fmt::Debug for RarityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RarityChecker").finish_non_exhaustive()
    }
}
