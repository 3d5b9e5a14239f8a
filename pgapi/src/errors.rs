use crate::db::errors::DbError;
use crate::i18n::{ErrorMessage, Locale, Message};
use crate::types::Resource;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Request body, path or query failed to parse
    #[error("Invalid request: {message}")]
    Validation { message: String },

    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: Resource, id: i32 },

    /// Request refers to a related resource that does not exist
    #[error("Referenced {resource} with ID {id} does not exist")]
    InvalidReference { resource: Resource, id: i32 },

    /// Uniqueness constraint violation
    #[error("Conflict: {source}")]
    Conflict {
        #[source]
        source: DbError,
    },

    /// Any other data-layer failure, reported to the client as `fallback`
    #[error("{fallback:?}: {source:#}")]
    Internal {
        fallback: Message,
        #[source]
        source: DbError,
    },
}

impl Error {
    /// Map a data-layer failure onto an HTTP error.
    ///
    /// A uniqueness violation is always a 400 with the fixed duplicate-value message,
    /// whatever the operation. Everything else is a 500 carrying `fallback`.
    pub fn from_db(err: DbError, fallback: Message) -> Self {
        if err.is_unique_violation() {
            Error::Conflict { source: err }
        } else {
            Error::Internal { fallback, source: err }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Error::Conflict { .. } => StatusCode::BAD_REQUEST,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Catalog entry shown to the client. Never includes internal error text.
    pub fn message(&self) -> Message {
        match self {
            Error::Validation { .. } => Message::InvalidRequest,
            Error::NotFound { resource: Resource::User, .. } => Message::UserNotFound,
            Error::NotFound { resource: Resource::Post, .. } => Message::PostNotFound,
            Error::InvalidReference { resource: Resource::User, .. } => Message::AuthorNotFound,
            Error::InvalidReference { resource: Resource::Post, .. } => Message::PostNotFound,
            Error::Conflict { .. } => Message::DuplicateValue,
            Error::Internal { fallback, .. } => *fallback,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            Error::Validation { message } => Some(message.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Internal { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Conflict { .. } => {
                tracing::warn!("Conflict error: {:#}", self);
            }
            Error::Validation { .. } | Error::NotFound { .. } | Error::InvalidReference { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let error = ErrorMessage {
            message: self.message(),
            details: self.details(),
        };

        // Rendered in English here; the localization middleware swaps the body for the
        // negotiated locale using the extension.
        let mut response = (status, Json(error.render(Locale::En))).into_response();
        response.extensions_mut().insert(error);
        response
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::common::ErrorResponse;

    fn unique_violation() -> DbError {
        DbError::UniqueViolation {
            constraint: Some("users_email_key".to_string()),
            table: Some("users".to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        }
    }

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn unique_violation_is_conflict_regardless_of_fallback() {
        for fallback in [Message::CreateUserFailed, Message::UpdateUserFailed, Message::CreatePostFailed] {
            let err = Error::from_db(unique_violation(), fallback);
            assert!(matches!(err, Error::Conflict { .. }));
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
            assert_eq!(err.message(), Message::DuplicateValue);
        }
    }

    #[test]
    fn other_db_errors_are_internal_with_fallback() {
        let err = Error::from_db(DbError::Other(anyhow::anyhow!("connection refused")), Message::FetchUsersFailed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), Message::FetchUsersFailed);

        let fk = DbError::ForeignKeyViolation {
            constraint: None,
            table: Some("posts".to_string()),
            message: "violates foreign key".to_string(),
        };
        let err = Error::from_db(fk, Message::CreatePostFailed);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), Message::CreatePostFailed);
    }

    #[test]
    fn not_found_and_invalid_reference_are_distinct() {
        let missing = Error::NotFound {
            resource: Resource::User,
            id: 3,
        };
        let bad_ref = Error::InvalidReference {
            resource: Resource::User,
            id: 3,
        };
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(bad_ref.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.message(), Message::UserNotFound);
        assert_eq!(bad_ref.message(), Message::AuthorNotFound);
    }

    #[tokio::test]
    async fn internal_error_body_hides_source() {
        let err = Error::from_db(
            DbError::Other(anyhow::anyhow!("password authentication failed for user postgres")),
            Message::DeletePostFailed,
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<ErrorMessage>().map(|e| e.message),
            Some(Message::DeletePostFailed)
        );

        let body = body_of(response).await;
        assert_eq!(body.message, "Failed to delete post");
        assert_eq!(body.details, None);
    }

    #[tokio::test]
    async fn validation_error_body_carries_details() {
        let response = Error::Validation {
            message: "missing field `email`".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body.message, "Invalid request data");
        assert_eq!(body.details.as_deref(), Some("missing field `email`"));
    }
}
