use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::modules::catalog_store::StoreError;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    FieldValidation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::Conflict(msg) => AppError::Conflict(msg),
            StoreError::ForeignKey(msg) => AppError::ReferentialIntegrity(msg),
            StoreError::Database(e) => AppError::Database(e),
        }
    }
}

/// Flatten validator output into `field -> [messages]`, falling back to the
/// rule code when a rule carries no message.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut field_errors = None;

        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::FieldValidation(ref errs) => {
                let fields = field_messages(errs);
                let flat = fields
                    .iter()
                    .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{}: {}", field, m)))
                    .collect();
                field_errors = Some(fields);
                (
                    StatusCode::BAD_REQUEST,
                    "One or more fields are invalid".to_string(),
                    Some(flat),
                )
            }
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::ReferentialIntegrity(ref msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let mut body = ApiResponse::<()>::error(Some(message), errors);
        body.field_errors = field_errors;

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_field_messages_keyed_by_field() {
        let errs = Named {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        let fields = field_messages(&errs);
        assert_eq!(fields.get("name"), Some(&vec!["Name is required".to_string()]));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::ReferentialIntegrity("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_error_conversion() {
        let err: AppError = StoreError::ForeignKey("category 9".into()).into();
        assert!(matches!(err, AppError::ReferentialIntegrity(_)));

        let err: AppError = StoreError::Conflict("movie 1".into()).into();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
