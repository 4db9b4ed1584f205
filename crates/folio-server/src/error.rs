use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_content::{ContentLoadError, StoreError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Admin gate denial. Deliberately carries no reason.
    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Request body cut off by the body limit before the size was known.
    #[error("Upload too large (max {max} bytes)")]
    BodyTooLarge { max: usize },

    #[error("Unsupported file type: {0}")]
    UnsupportedMedia(String),

    #[error("Content unavailable: {0}")]
    Content(#[from] ContentLoadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Load(e) => ServerError::Content(e),
            StoreError::Invalid { .. } => ServerError::BadRequest(err.to_string()),
            StoreError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            StoreError::Conflict { .. } => ServerError::Conflict(err.to_string()),
            StoreError::MalformedCollection { .. }
            | StoreError::Io(_)
            | StoreError::Serialize(_) => ServerError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::PayloadTooLarge { .. } | ServerError::BodyTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            ServerError::UnsupportedMedia(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            ServerError::Content(e) => {
                error!(domain = %e.domain, error = %e, "Content document failed to load");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Content unavailable: {}", e.domain),
                )
            }
            ServerError::Internal(detail) => {
                error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::{CollectionKind, ContentDomain, LoadCause};

    #[test]
    fn forbidden_has_bare_message() {
        assert_eq!(ServerError::Forbidden.to_string(), "Forbidden");
        let response = ServerError::Forbidden.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let not_found: ServerError = StoreError::NotFound {
            kind: CollectionKind::Post,
            slug: "x".into(),
        }
        .into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict: ServerError = StoreError::Conflict {
            kind: CollectionKind::Tag,
            slug: "x".into(),
        }
        .into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let load: ServerError =
            StoreError::Load(ContentLoadError::new(ContentDomain::Hero, LoadCause::Missing))
                .into();
        assert!(matches!(load, ServerError::Content(_)));
        assert_eq!(
            load.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
