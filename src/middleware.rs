//! Request ID and CORS middleware.
//!
//! Every incoming request gets a UUID v4 and a tracing span wrapping its whole
//! lifecycle, so the rarity diagnostic line carries the request_id it belongs
//! to. The same ID is echoed to the caller in `x-request-id`. The CORS layer is
//! built from `[cors]` config.

use std::time::Instant;

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{CorsConfig, CORS_ANY_ORIGIN};

/// Response header carrying the request ID used in logs
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Middleware that tags each request with an ID, a span, and a response header.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}

/// Build the CORS layer from configuration.
///
/// - `"*"` anywhere in the list (surrounding whitespace ignored): any origin
/// - Otherwise: only the listed origins; unparseable entries are skipped, and
///   if none remain every cross-origin request is refused
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allows_any_origin() {
        tracing::warn!("CORS: Allowing ALL origins. Restrict cors.allowed_origins for production");
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        // AllowOrigin::list panics on a wildcard entry
        .filter(|origin| *origin != CORS_ANY_ORIGIN)
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::info!(origin = %origin, "CORS: Allowing origin");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "CORS: Skipping invalid origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!("CORS: No valid origins in cors.allowed_origins, refusing cross-origin requests");
    }

    base.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_padded_wildcard_builds_layer() {
        cors_layer(&config(&[" *"]));
        cors_layer(&config(&["http://a.example", "* "]));
    }

    #[test]
    fn test_invalid_only_origins_builds_layer() {
        cors_layer(&config(&["http://a.example\n"]));
    }
}
