/// Error handling for the transformation layer
///
/// Every serializer operation returns `ApiResult<T>`. `ApiError` is the
/// error taxonomy callers branch on, and it converts into an HTTP response
/// for whichever server embeds this crate.
///
/// | Variant          | Status | `error` code       |
/// |------------------|--------|--------------------|
/// | `Validation`     | 400    | `validation_error` |
/// | `Authentication` | 401    | `authorization`    |
/// | `NotFound`       | 404    | `not_found`        |
/// | `Conflict`       | 409    | `conflict`         |
/// | `InternalError`  | 500    | `internal_error`   |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hireboard_shared::{
    accounts::AccountError,
    auth::{
        backend::{AuthError, AUTHENTICATION_FAILED_MESSAGE},
        password::PasswordError,
    },
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used for the profile sign-up conflict
pub const USER_EXISTS_MESSAGE: &str = "A user with this email already exists!";

/// Unified error type
#[derive(Debug)]
pub enum ApiError {
    /// Field-level validation failures
    Validation(Vec<ValidationErrorDetail>),

    /// The record being created already exists
    ///
    /// `user_exists` is the machine-checkable flag for the duplicate-account
    /// case.
    Conflict { message: String, user_exists: bool },

    /// Credentials were rejected; the message never says why
    Authentication(String),

    NotFound(String),

    /// Details are logged, never returned
    InternalError(String),
}

/// One field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field path, e.g. `email` or `user.password`
    pub field: String,

    pub message: String,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "validation_error", "authorization")
    pub error: String,

    /// Human-readable message
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_exists_error: Option<bool>,
}

impl ApiError {
    /// Single-field validation error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![ValidationErrorDetail {
            field: field.into(),
            message: message.into(),
        }])
    }

    /// The duplicate-account conflict raised by profile creation
    pub fn user_exists() -> Self {
        ApiError::Conflict {
            message: USER_EXISTS_MESSAGE.to_string(),
            user_exists: true,
        }
    }

    /// True for the duplicate-account conflict
    pub fn is_user_exists(&self) -> bool {
        matches!(self, ApiError::Conflict { user_exists: true, .. })
    }

    /// Validation details, if this is a validation error
    pub fn details(&self) -> Option<&[ValidationErrorDetail]> {
        match self {
            ApiError::Validation(details) => Some(details),
            _ => None,
        }
    }

    /// Prefixes every validation field with `prefix.`
    ///
    /// Used when a nested payload is validated on its own.
    pub fn nested(self, prefix: &str) -> Self {
        match self {
            ApiError::Validation(details) => ApiError::Validation(
                details
                    .into_iter()
                    .map(|d| ValidationErrorDetail {
                        field: format!("{}.{}", prefix, d.field),
                        message: d.message,
                    })
                    .collect(),
            ),
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Conflict { message, .. } => write!(f, "Conflict: {}", message),
            ApiError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(errors) => ErrorResponse {
                error: "validation_error".to_string(),
                message: "Request validation failed".to_string(),
                details: Some(errors),
                user_exists_error: None,
            },
            ApiError::Conflict {
                message,
                user_exists,
            } => ErrorResponse {
                error: "conflict".to_string(),
                message,
                details: None,
                user_exists_error: user_exists.then_some(true),
            },
            ApiError::Authentication(message) => ErrorResponse {
                error: "authorization".to_string(),
                message,
                details: None,
                user_exists_error: None,
            },
            ApiError::NotFound(message) => ErrorResponse {
                error: "not_found".to_string(),
                message,
                details: None,
                user_exists_error: None,
            },
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "An internal error occurred".to_string(),
                    details: None,
                    user_exists_error: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Converts `validator` output into field details
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value.".to_string()),
                })
            })
            .collect();

        // HashMap iteration order is random
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(details)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            err => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailTaken => {
                ApiError::field("email", "user with this email already exists.")
            }
            AccountError::InvalidPassword(msg) => ApiError::field("password", msg),
            AccountError::NotFound => ApiError::NotFound("Account not found".to_string()),
            AccountError::Password(err) => err.into(),
            AccountError::Database(err) => err.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                ApiError::Authentication(AUTHENTICATION_FAILED_MESSAGE.to_string())
            }
            AuthError::Password(err) => err.into(),
            AuthError::Database(err) => err.into(),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("Organization not found".to_string());
        assert_eq!(err.to_string(), "Not found: Organization not found");

        let err = ApiError::Validation(vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Enter a valid email address.".to_string(),
            },
            ValidationErrorDetail {
                field: "password".to_string(),
                message: "Too short".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_nested_prefixes_fields() {
        let err = ApiError::field("password", "Too short").nested("user");
        assert_eq!(err.details().unwrap()[0].field, "user.password");

        let untouched = ApiError::user_exists().nested("user");
        assert!(untouched.is_user_exists());
    }

    #[test]
    fn test_email_taken_is_a_field_error() {
        let err = ApiError::from(AccountError::EmailTaken);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.details().unwrap()[0].field, "email");
        assert!(!err.is_user_exists());
    }

    #[test]
    fn test_invalid_credentials_map_to_authentication() {
        let err = ApiError::from(AuthError::InvalidCredentials);
        assert!(matches!(
            err,
            ApiError::Authentication(ref msg)
                if msg == "Unable to authenticate with provided credentials."
        ));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert_eq!(
            ApiError::from(sqlx::Error::RowNotFound).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_user_exists_response_carries_flag() {
        let response = ApiError::user_exists().into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = body_json(response).await;
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], USER_EXISTS_MESSAGE);
        assert_eq!(body["user_exists_error"], true);
    }

    #[tokio::test]
    async fn test_authentication_response() {
        let response = ApiError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "authorization");
        assert!(body.get("user_exists_error").is_none());
    }

    #[tokio::test]
    async fn test_validation_response_lists_fields() {
        let response = ApiError::field("website", "Enter a valid URL.").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"][0]["field"], "website");
        assert_eq!(body["details"][0]["message"], "Enter a valid URL.");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = ApiError::InternalError("connection refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal error occurred");
    }
}
