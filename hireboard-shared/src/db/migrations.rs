/// Schema bootstrap
///
/// The schema lives in `migrations/` at the workspace root and is embedded
/// into the binary at compile time by `sqlx::migrate!`. Applying it is
/// idempotent: already-applied files are skipped, and concurrent callers
/// serialize on sqlx's advisory lock.
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::db::{migrations::run_migrations, pool::{create_pool, DatabaseConfig}};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::{migrate::Migrator, PgPool};
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applies every pending schema file
///
/// # Errors
///
/// Returns an error if a file fails to apply or a previously applied file
/// was modified after the fact.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(available = MIGRATOR.iter().count(), "Applying database schema");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database schema is up to date");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Schema migration failed");
            Err(e)
        }
    }
}
