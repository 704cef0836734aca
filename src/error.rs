use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced to HTTP callers.
///
/// Rarity determination itself cannot fail; the only failures are bodies the
/// JSON extractor refuses (bad syntax, wrong content type, non-object payload).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
        };

        tracing::debug!(status = status.as_u16(), error = %message, "Rejected request body");

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Request, StatusCode},
    };
    use serde_json::Value;

    async fn reject(content_type: &str, body: &'static str) -> Response {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        let rejection = Json::<serde_json::Map<String, Value>>::from_request(request, &())
            .await
            .unwrap_err();
        AppError::from(rejection).into_response()
    }

    async fn error_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let response = reject("application/json", "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = error_body(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let response = reject("text/plain", "{}").await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_non_object_is_unprocessable() {
        let response = reject("application/json", "[1, 2]").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
