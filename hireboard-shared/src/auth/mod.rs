/// Credential handling
///
/// # Modules
///
/// - [`password`]: Argon2id hashing, verification and the length rule
/// - [`backend`]: email/password authentication against stored accounts
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::auth::backend::{authenticate, AuthError};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), AuthError> {
/// match authenticate(&pool, "jane@example.com", "hunter22").await {
///     Ok(account) => println!("welcome back {}", account.name),
///     Err(AuthError::InvalidCredentials) => println!("try again"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```

pub mod backend;
pub mod password;
