/// Server error types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notes_core::{NotesError, ValidationErrors};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Authorization failed: {0}")]
    Unauthorized(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl ServerError {
    /// Stable machine-readable kind, sent as `code` in error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "VALIDATION_ERROR",
            ServerError::Conflict(_) => "CONFLICT",
            ServerError::Auth(_) => "AUTHENTICATION_ERROR",
            ServerError::Unauthorized(_) | ServerError::Jwt(_) => "UNAUTHORIZED",
            ServerError::NotFound(_) => "NOT_FOUND",
            ServerError::Internal(_)
            | ServerError::Storage(_)
            | ServerError::Config(_)
            | ServerError::Bcrypt(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<NotesError> for ServerError {
    fn from(err: NotesError) -> Self {
        match err {
            NotesError::Validation(errors) => ServerError::Validation(errors),
            NotesError::Conflict(msg) => ServerError::Conflict(msg),
            NotesError::NotFound { entity, .. } => ServerError::NotFound(format!("{entity} not found")),
            NotesError::Storage(msg) => ServerError::Storage(msg),
        }
    }
}

impl From<ValidationErrors> for ServerError {
    fn from(errors: ValidationErrors) -> Self {
        ServerError::Validation(errors)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(rejection_errors(
            "body",
            "Malformed request body",
            &rejection.body_text(),
        ))
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::Validation(rejection_errors(
            "query",
            "Malformed query string",
            &rejection.body_text(),
        ))
    }
}

/// Field-level detail for a request the extractor could not deserialize
///
/// Falls back to `fallback_field` when the rejection names no field.
fn rejection_errors(fallback_field: &str, fallback_message: &str, detail: &str) -> ValidationErrors {
    tracing::debug!("Request rejected: {}", detail);

    let mut errors = ValidationErrors::new();
    match rejected_field(detail) {
        Some(RejectedField::Missing(field)) => errors.add(field, "Required"),
        Some(RejectedField::Invalid(field)) => errors.add(field, "Invalid value"),
        None => errors.add(fallback_field, fallback_message),
    }
    errors
}

#[derive(Debug, PartialEq, Eq)]
enum RejectedField<'a> {
    Missing(&'a str),
    Invalid(&'a str),
}

/// Pull the offending field out of a serde rejection message
///
/// Missing fields read "missing field `name`"; type errors are prefixed with
/// the field path, as in "target type: title: invalid type: ...".
fn rejected_field(detail: &str) -> Option<RejectedField<'_>> {
    if let Some((_, rest)) = detail.split_once("missing field `") {
        return rest
            .split('`')
            .next()
            .filter(|f| !f.is_empty())
            .map(RejectedField::Missing);
    }

    let (_, rest) = detail.split_once("target type: ")?;
    let (path, _) = rest.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then_some(RejectedField::Invalid(path))
}

impl From<notes_storage::StorageError> for ServerError {
    fn from(err: notes_storage::StorageError) -> Self {
        // Convert StorageError -> NotesError -> ServerError
        ServerError::from(NotesError::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error_message) = match self {
            ServerError::Validation(ref errors) => {
                let body = Json(json!({
                    "error": "Invalid input",
                    "code": code,
                    "fields": errors,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::Validation(ValidationErrors::new()), StatusCode::BAD_REQUEST),
            (ServerError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServerError::Auth("x".into()), StatusCode::UNAUTHORIZED),
            (ServerError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_rejected_field_missing() {
        let detail = "Failed to deserialize the JSON body into the target type: \
                      missing field `content` at line 1 column 17";
        assert_eq!(rejected_field(detail), Some(RejectedField::Missing("content")));

        let detail = "Failed to deserialize query string: missing field `id`";
        assert_eq!(rejected_field(detail), Some(RejectedField::Missing("id")));
    }

    #[test]
    fn test_rejected_field_wrong_type() {
        let detail = "Failed to deserialize the JSON body into the target type: \
                      title: invalid type: integer `5`, expected a string at line 1 column 11";
        assert_eq!(rejected_field(detail), Some(RejectedField::Invalid("title")));
    }

    #[test]
    fn test_rejected_field_unnamed() {
        let detail = "Failed to parse the request body as JSON: EOF while parsing an object";
        assert_eq!(rejected_field(detail), None);

        let errors = rejection_errors("body", "Malformed request body", detail);
        assert_eq!(
            errors.field("body"),
            Some(&["Malformed request body".to_string()][..])
        );
    }

    #[test]
    fn test_not_found_hides_id() {
        let err = ServerError::from(NotesError::not_found("Note", "secret-id"));
        assert!(matches!(err, ServerError::NotFound(ref msg) if msg == "Note not found"));
    }
}
