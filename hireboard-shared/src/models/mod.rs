/// Store records and their queries
///
/// - `account`: authenticatable identities
/// - `organization`: employers
/// - `profile`: recruiter records linking an account to an organization
///
/// Every query function is generic over [`sqlx::PgExecutor`], so the same
/// code runs against a `&PgPool` or inside a transaction (`&mut *tx`).
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::models::profile::{CreateProfile, Profile};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, account_id: Uuid) -> Result<(), sqlx::Error> {
/// let mut tx = pool.begin().await?;
/// let profile = Profile::create(
///     &mut *tx,
///     CreateProfile {
///         account_id: Some(account_id),
///         ..Default::default()
///     },
/// )
/// .await?;
/// tx.commit().await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod organization;
pub mod profile;
