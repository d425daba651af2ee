/// Configuration management
///
/// Settings come from the environment, with a `.env` file honoured in
/// development.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `HIREBOARD__DATABASE__MAX_CONNECTIONS`: pool size (default: 10)
/// - `HIREBOARD__DATABASE__MIN_CONNECTIONS`: idle connections kept (default: 1)
/// - `HIREBOARD__DATABASE__ACQUIRE_TIMEOUT_SECONDS`: default 30
/// - `HIREBOARD__PAGINATION__DEFAULT_LIMIT`: page size when none is asked for (default: 50)
/// - `HIREBOARD__PAGINATION__MAX_LIMIT`: largest page served (default: 500)
///
/// # Example
///
/// ```no_run
/// use hireboard_api::config::Settings;
/// use hireboard_shared::db::pool::create_pool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let settings = Settings::from_env()?;
/// let pool = create_pool(settings.database_config()).await?;
/// # Ok(())
/// # }
/// ```

use hireboard_shared::db::pool::DatabaseConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,

    #[serde(default)]
    pub pagination: PaginationSettings,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: String,

    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Limits applied to list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    pub default_limit: i64,
    pub max_limit: i64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
        }
    }
}

impl PaginationSettings {
    /// Resolves a requested page size against the configured bounds
    pub fn clamp(&self, requested: Option<i64>) -> i64 {
        // A hand-built value may carry a non-positive cap
        let max = self.max_limit.max(1);
        requested.unwrap_or(self.default_limit).max(1).min(max)
    }
}

impl Settings {
    /// Loads settings from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable has an
    /// invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("HIREBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            );

        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }

        Self::from_builder(builder)
    }

    /// Fills in defaults and deserializes
    ///
    /// Split out of [`Settings::from_env`] so other sources (files, tests)
    /// can feed the same defaults.
    pub fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let settings: Settings = builder
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.acquire_timeout_seconds", 30)?
            .set_default("pagination.default_limit", 50)?
            .set_default("pagination.max_limit", 500)?
            .build()?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

        if settings.database.url.is_empty() {
            anyhow::bail!("DATABASE_URL environment variable is required");
        }
        if settings.pagination.max_limit < 1 || settings.pagination.default_limit < 1 {
            anyhow::bail!("pagination limits must be positive");
        }

        Ok(settings)
    }

    /// Pool configuration for [`hireboard_shared::db::pool::create_pool`]
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            acquire_timeout_seconds: self.database.acquire_timeout_seconds,
            ..Default::default()
        }
    }
}
