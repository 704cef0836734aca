//! Rarity check endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::instrument;

use crate::error::AppError;
use crate::rarity::{RarityRequest, RarityResponse};
use crate::state::AppState;

/// Handler for `POST /check-rarity`.
///
/// Missing or non-string fields fall back to defaults; only a body the JSON
/// extractor refuses produces an error.
#[instrument(name = "rarity::check", skip(state, payload))]
pub async fn check(
    State(state): State<AppState>,
    payload: Result<Json<RarityRequest>, JsonRejection>,
) -> Result<Json<RarityResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.rarity.check(request)))
}
