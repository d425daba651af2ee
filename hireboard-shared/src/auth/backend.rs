/// Email/password authentication against the account store
///
/// Every failure a caller could learn something from collapses into
/// [`AuthError::InvalidCredentials`]: unknown email, wrong password and
/// inactive account are indistinguishable. An unknown email still pays for
/// one Argon2 hash so the response time does not give it away either.

use crate::accounts::normalize_email;
use crate::auth::password::{self, PasswordError};
use crate::models::account::Account;
use sqlx::PgExecutor;
use tracing::{debug, warn};

/// Message shown for every rejected credential pair
pub const AUTHENTICATION_FAILED_MESSAGE: &str =
    "Unable to authenticate with provided credentials.";

/// Authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unable to authenticate with provided credentials.")]
    InvalidCredentials,

    /// Stored hash could not be checked
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolves an email/password pair to an active account
///
/// The password is compared exactly as given; no trimming.
pub async fn authenticate<'e, E>(executor: E, email: &str, raw_password: &str) -> Result<Account, AuthError>
where
    E: PgExecutor<'e>,
{
    let email = normalize_email(email);

    let Some(account) = Account::find_by_email(executor, &email).await? else {
        // Equalize timing with the known-account path
        let _ = password::hash_password(raw_password);
        warn!("Authentication failed");
        debug!(%email, "No account for email");
        return Err(AuthError::InvalidCredentials);
    };

    if !password::verify_password(raw_password, &account.password_hash)? {
        warn!(account_id = %account.id, "Authentication failed");
        return Err(AuthError::InvalidCredentials);
    }

    if !account.is_active {
        warn!(account_id = %account.id, "Authentication failed");
        debug!(account_id = %account.id, "Account is inactive");
        return Err(AuthError::InvalidCredentials);
    }

    debug!(account_id = %account.id, "Authenticated");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            AUTHENTICATION_FAILED_MESSAGE
        );
    }
}
