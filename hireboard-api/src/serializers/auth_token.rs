/// Email/password credential verification
///
/// The verifier only answers "who is this": it binds the matching active
/// account into [`ValidatedCredentials`]. Issuing a token for that account
/// is up to the caller.
///
/// # Errors
///
/// - `400 Bad Request`: malformed email or blank password
/// - `401 Unauthorized`: unknown email, wrong password or inactive account,
///   all reported with the same message

use crate::error::ApiResult;
use hireboard_shared::{auth::backend, models::account::Account};
use serde::Deserialize;
use sqlx::PgPool;
use std::fmt;
use tracing::{info, warn};
use validator::Validate;

/// Credential pair submitted for verification
#[derive(Clone, Deserialize, Validate)]
pub struct AuthTokenRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    /// Compared exactly as given
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

impl fmt::Debug for AuthTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokenRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Request metadata carried into the verification logs
#[derive(Debug, Clone, Default)]
pub struct CallerContext {
    pub remote_addr: Option<String>,
    pub request_id: Option<String>,
}

/// Output of a successful verification
#[derive(Debug, Clone)]
pub struct ValidatedCredentials {
    /// Email as submitted
    pub email: String,

    pub user: Account,
}

/// Verifies a credential pair and binds the account it belongs to
pub async fn validate_credentials(
    pool: &PgPool,
    ctx: &CallerContext,
    req: AuthTokenRequest,
) -> ApiResult<ValidatedCredentials> {
    req.validate()?;

    let user = match backend::authenticate(pool, &req.email, &req.password).await {
        Ok(user) => user,
        Err(err) => {
            warn!(
                remote_addr = ?ctx.remote_addr,
                request_id = ?ctx.request_id,
                "Credential verification rejected"
            );
            return Err(err.into());
        }
    };

    info!(
        account_id = %user.id,
        remote_addr = ?ctx.remote_addr,
        request_id = ?ctx.request_id,
        "Credentials verified"
    );

    Ok(ValidatedCredentials {
        email: req.email,
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn request(email: &str, password: &str) -> AuthTokenRequest {
        AuthTokenRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_blank_password_is_a_field_error() {
        let err = ApiError::from(request("jane@example.com", "").validate().unwrap_err());
        let details = err.details().unwrap();
        assert_eq!(details[0].field, "password");
        assert_eq!(details[0].message, "This field may not be blank.");
    }

    #[test]
    fn test_whitespace_password_passes_shape_check() {
        assert!(request("jane@example.com", "   ").validate().is_ok());
    }

    #[test]
    fn test_malformed_email_is_a_field_error() {
        let err = ApiError::from(request("jane", "hunter22").validate().unwrap_err());
        assert_eq!(err.details().unwrap()[0].field, "email");
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", request("jane@example.com", "topsecret"));
        assert!(!rendered.contains("topsecret"));
    }
}
