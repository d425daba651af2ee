/// Account manager
///
/// The write paths for accounts that involve a raw password. Everything
/// here hashes before touching the database, so callers never handle
/// `password_hash` directly.
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::accounts::{create_account, NewAccount};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), hireboard_shared::accounts::AccountError> {
/// let account = create_account(
///     &pool,
///     NewAccount {
///         email: "jane@Example.COM".to_string(),
///         name: "Jane".to_string(),
///         password: "hunter22".to_string(),
///     },
/// )
/// .await?;
/// assert_eq!(account.email, "jane@example.com");
/// # Ok(())
/// # }
/// ```

use crate::auth::password::{self, PasswordError};
use crate::models::account::{Account, CreateAccount, UpdateAccount};
use sqlx::PgExecutor;
use tracing::{debug, info};
use uuid::Uuid;

/// Name of the unique constraint on `accounts.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// Errors from account writes
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The email is registered to another account
    #[error("An account with this email already exists")]
    EmailTaken,

    /// The raw password failed the length check
    #[error("{0}")]
    InvalidPassword(String),

    #[error("Account not found")]
    NotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        if is_email_conflict(&err) {
            AccountError::EmailTaken
        } else {
            AccountError::Database(err)
        }
    }
}

/// True if `err` is a unique violation on the account email
pub fn is_email_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
        }
        _ => false,
    }
}

/// Raw input for a new account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Raw changes to an existing account; only `Some` fields are applied
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

/// Normalizes an email address
///
/// Surrounding whitespace is removed and the domain part is lowercased.
/// The local part is kept as given.
///
/// ```
/// use hireboard_shared::accounts::normalize_email;
///
/// assert_eq!(normalize_email(" Jane.Doe@EXAMPLE.com "), "Jane.Doe@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Creates a regular account
///
/// # Errors
///
/// - `InvalidPassword` if the password is shorter than
///   [`password::MIN_PASSWORD_LENGTH`]
/// - `EmailTaken` if the email is already registered
pub async fn create_account<'e, E>(executor: E, new: NewAccount) -> Result<Account, AccountError>
where
    E: PgExecutor<'e>,
{
    insert_account(executor, new, false).await
}

/// Creates a staff account
pub async fn create_staff_account<'e, E>(
    executor: E,
    new: NewAccount,
) -> Result<Account, AccountError>
where
    E: PgExecutor<'e>,
{
    insert_account(executor, new, true).await
}

async fn insert_account<'e, E>(
    executor: E,
    new: NewAccount,
    is_staff: bool,
) -> Result<Account, AccountError>
where
    E: PgExecutor<'e>,
{
    password::validate_password_length(&new.password).map_err(AccountError::InvalidPassword)?;

    let password_hash = password::hash_password(&new.password)?;

    let account = Account::create(
        executor,
        CreateAccount {
            email: normalize_email(&new.email),
            name: new.name,
            password_hash,
            is_staff,
        },
    )
    .await?;

    info!(account_id = %account.id, is_staff, "Account created");
    Ok(account)
}

/// Applies raw changes to an account
///
/// A new password is length-checked and re-hashed before it is written.
pub async fn update_account<'e, E>(
    executor: E,
    id: Uuid,
    changes: AccountChanges,
) -> Result<Account, AccountError>
where
    E: PgExecutor<'e>,
{
    let password_hash = match changes.password.as_deref() {
        Some(raw) => {
            password::validate_password_length(raw).map_err(AccountError::InvalidPassword)?;
            Some(password::hash_password(raw)?)
        }
        None => None,
    };
    let password_changed = password_hash.is_some();

    let update = UpdateAccount {
        email: changes.email.as_deref().map(normalize_email),
        name: changes.name,
        password_hash,
        is_active: changes.is_active,
        is_staff: None,
    };

    let account = Account::update(executor, id, update)
        .await?
        .ok_or(AccountError::NotFound)?;

    debug!(account_id = %account.id, password_changed, "Account updated");
    Ok(account)
}

/// Replaces an account's password
pub async fn set_password<'e, E>(executor: E, id: Uuid, raw: &str) -> Result<Account, AccountError>
where
    E: PgExecutor<'e>,
{
    update_account(
        executor,
        id,
        AccountChanges {
            password: Some(raw.to_string()),
            ..Default::default()
        },
    )
    .await
}
