use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use safeview_core::wizard::{FieldError, WizardError};
use safeview_store::StoreError;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ServerError {
    /// One or more request fields failed validation.
    #[error("Invalid data")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailExists(_) => ServerError::BadRequest(err.to_string()),
            StoreError::UnknownUser(_) | StoreError::UnknownDevice(_) => {
                ServerError::NotFound(err.to_string())
            }
            StoreError::DeviceNotOwned { .. } => ServerError::BadRequest(err.to_string()),
        }
    }
}

/// Bodies axum could not deserialize get the same structured response
/// as field validation, addressed to the body as a whole.
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::Validation(vec![FieldError {
            field: "body",
            message: rejection.body_text(),
        }])
    }
}

impl From<WizardError> for ServerError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Invalid(errors) => ServerError::Validation(errors),
            WizardError::Transition { .. } => ServerError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": "Invalid data", "errors": errors }),
            ),
            ServerError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": message }),
            ),
            ServerError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "message": message }),
            ),
            ServerError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": "Internal server error" }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_duplicate_email_maps_to_bad_request() {
        let err: ServerError = StoreError::EmailExists("a@b.co".to_string()).into();
        match err {
            ServerError::BadRequest(message) => {
                assert_eq!(message, "User already exists with this email")
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_device_maps_to_not_found() {
        let err: ServerError = StoreError::UnknownDevice(Uuid::new_v4()).into();
        assert!(matches!(err, ServerError::NotFound(_)));
    }
}
