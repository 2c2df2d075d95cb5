//! Application error type mapping to HTTP status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use promptsmith_types::error::GenerationError;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Failure from one of the generation services.
    Generation(GenerationError),
    /// Non-POST request to a generation endpoint.
    MethodNotAllowed,
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Generation(e) if e.is_caller_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Generation(e) => {
                tracing::debug!(code = e.code(), "generation request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GenerationError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                GenerationError::Unconfigured {
                    key_name: "GEMINI_API_KEY".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (GenerationError::EmptyResponse("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (GenerationError::MalformedOutput("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                GenerationError::BudgetExceeded { limit: 3000 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (GenerationError::UpstreamFailure("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
        assert_eq!(
            AppError::MethodNotAllowed.into_response().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
