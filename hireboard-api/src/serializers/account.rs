/// Account wire shapes
///
/// `password` is write-only: it is accepted by [`AccountWrite`] and
/// [`AccountPatch`] and never emitted by [`AccountRead`].
///
/// # Example
///
/// ```json
/// { "email": "jane@example.com", "password": "hunter22", "name": "Jane" }
/// ```

use crate::error::{ApiError, ApiResult};
use hireboard_shared::{
    accounts::{self, normalize_email, AccountChanges, NewAccount},
    models::account::Account,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use tracing::info;
use validator::Validate;

/// Account write shape
#[derive(Clone, Deserialize, Validate)]
pub struct AccountWrite {
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: String,

    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

/// Partial account write shape; absent fields are left alone
#[derive(Clone, Default, Deserialize, Validate)]
pub struct AccountPatch {
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: Option<String>,

    #[validate(length(min = 5, message = "Ensure this field has at least 5 characters."))]
    pub password: Option<String>,

    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
}

/// Account read shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRead {
    pub email: String,
    pub name: String,
}

impl From<&Account> for AccountRead {
    fn from(account: &Account) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

impl fmt::Debug for AccountWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountWrite")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Debug for AccountPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPatch")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .finish()
    }
}

impl From<AccountWrite> for NewAccount {
    fn from(payload: AccountWrite) -> Self {
        NewAccount {
            email: payload.email,
            name: payload.name,
            password: payload.password,
        }
    }
}

impl From<AccountPatch> for AccountChanges {
    fn from(patch: AccountPatch) -> Self {
        AccountChanges {
            email: patch.email,
            name: patch.name,
            password: patch.password,
            is_active: None,
        }
    }
}

/// Creates an account from a write payload
///
/// # Errors
///
/// - `Validation` on a malformed email, a short password, or an email that
///   is already registered (reported on the `email` field)
pub async fn create_account(pool: &PgPool, payload: AccountWrite) -> ApiResult<AccountRead> {
    payload.validate()?;

    if Account::exists_by_email(pool, &normalize_email(&payload.email)).await? {
        return Err(ApiError::field(
            "email",
            "user with this email already exists.",
        ));
    }

    // A concurrent insert can still win; the unique constraint catches it
    let account = accounts::create_account(pool, payload.into()).await?;

    info!(account_id = %account.id, "Account registered");
    Ok(AccountRead::from(&account))
}

/// Applies a partial payload to an existing account
///
/// A new password is re-hashed before it is stored.
pub async fn update_account<'e, E>(
    executor: E,
    account: &Account,
    patch: AccountPatch,
) -> ApiResult<Account>
where
    E: PgExecutor<'e>,
{
    patch.validate()?;

    let account = accounts::update_account(executor, account.id, patch.into()).await?;
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn write(email: &str, password: &str) -> AccountWrite {
        AccountWrite {
            email: email.to_string(),
            password: password.to_string(),
            name: "Jane".to_string(),
        }
    }

    #[test]
    fn test_valid_write_payload() {
        assert!(write("jane@example.com", "12345").validate().is_ok());
    }

    #[test]
    fn test_short_password_is_rejected() {
        let err = ApiError::from(write("jane@example.com", "1234").validate().unwrap_err());
        let details = err.details().unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "password");
        assert_eq!(details[0].message, "Ensure this field has at least 5 characters.");
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let err = ApiError::from(write("not-an-email", "12345").validate().unwrap_err());
        assert_eq!(err.details().unwrap()[0].field, "email");
    }

    #[test]
    fn test_both_fields_reported_in_field_order() {
        let err = ApiError::from(write("nope", "1").validate().unwrap_err());
        let fields: Vec<_> = err.details().unwrap().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn test_name_defaults_to_empty() {
        let payload: AccountWrite =
            serde_json::from_str(r#"{"email": "a@example.com", "password": "12345"}"#).unwrap();
        assert_eq!(payload.name, "");
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(AccountPatch::default().validate().is_ok());
    }

    #[test]
    fn test_patch_with_short_password_is_rejected() {
        let patch = AccountPatch {
            password: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", write("jane@example.com", "topsecret"));
        assert!(!rendered.contains("topsecret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_read_shape_has_no_password() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            is_active: true,
            is_staff: false,
            last_active: None,
            date_joined: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(AccountRead::from(&account)).unwrap();
        assert_eq!(json, serde_json::json!({"email": "jane@example.com", "name": "Jane"}));
    }
}
