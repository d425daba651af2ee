/// Organization model and database operations
///
/// Organizations are the employers recruiter profiles belong to. Names are
/// not unique; listings are ordered by name.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE organizations (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     active BOOLEAN NOT NULL DEFAULT TRUE,
///     website VARCHAR(200),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::models::organization::{CreateOrganization, Organization};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let org = Organization::create(
///     &pool,
///     CreateOrganization {
///         name: "Acme Recruiting".to_string(),
///         active: true,
///         website: Some("https://acme.example".to_string()),
///     },
/// )
/// .await?;
///
/// for org in Organization::list(&pool, None, 0).await? {
///     println!("{}", org.name);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const ORGANIZATION_COLUMNS: &str = "id, name, active, website, created_at, updated_at";

/// Organization row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Primary key (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Whether the organization is currently hiring through the platform
    pub active: bool,

    /// Company website
    pub website: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an organization
#[derive(Debug, Clone)]
pub struct CreateOrganization {
    pub name: String,
    pub active: bool,
    pub website: Option<String>,
}

/// Partial update; only `Some` fields are written
///
/// `website: Some(None)` clears the website.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub website: Option<Option<String>>,
}

impl Organization {
    /// Inserts a new organization
    pub async fn create<'e, E>(executor: E, data: CreateOrganization) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO organizations (name, active, website) \
             VALUES ($1, $2, $3) RETURNING {ORGANIZATION_COLUMNS}"
        );

        sqlx::query_as::<_, Organization>(&query)
            .bind(data.name)
            .bind(data.active)
            .bind(data.website)
            .fetch_one(executor)
            .await
    }

    /// Finds an organization by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE id = $1");

        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Checks whether an organization exists
    pub async fn exists<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM organizations WHERE id = $1)")
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Lists organizations ordered by name, then creation time
    ///
    /// `limit: None` returns every row after `offset`.
    pub async fn list<'e, E>(
        executor: E,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ORGANIZATION_COLUMNS} FROM organizations \
             ORDER BY name ASC, created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );

        sqlx::query_as::<_, Organization>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    /// Applies a partial update; `None` if the organization does not exist
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateOrganization,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = String::from("UPDATE organizations SET updated_at = NOW()");
        let mut bind_count = 1;

        for (column, present) in [
            ("name", data.name.is_some()),
            ("active", data.active.is_some()),
            ("website", data.website.is_some()),
        ] {
            if present {
                bind_count += 1;
                query.push_str(&format!(", {column} = ${bind_count}"));
            }
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {ORGANIZATION_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Organization>(&query).bind(id);
        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(active) = data.active {
            q = q.bind(active);
        }
        if let Some(website) = data.website {
            q = q.bind(website);
        }

        q.fetch_optional(executor).await
    }

    /// Deletes an organization
    ///
    /// Profiles that referenced it keep existing with a null organization
    /// (`ON DELETE SET NULL`).
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all organizations
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM organizations")
            .fetch_one(executor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_organization_default() {
        let update = UpdateOrganization::default();
        assert!(update.name.is_none());
        assert!(update.active.is_none());
        assert!(update.website.is_none());
    }

    #[test]
    fn test_clearing_website_is_distinct_from_leaving_it() {
        let clear = UpdateOrganization {
            website: Some(None),
            ..Default::default()
        };
        assert_eq!(clear.website, Some(None));
        assert_ne!(clear.website, UpdateOrganization::default().website);
    }
}
