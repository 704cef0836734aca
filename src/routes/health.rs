//! Health check endpoint for container orchestration.
//!
//! Liveness only: returns 200 OK whenever the process can answer HTTP.

/// Health check handler.
pub async fn health() -> &'static str {
    "ok"
}
