/// Recruiter profile model and database operations
///
/// A profile links at most one account to at most one organization and
/// carries the recruiter's administrative flag.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     account_id UUID REFERENCES accounts(id) ON DELETE CASCADE,
///     organization_id UUID REFERENCES organizations(id) ON DELETE SET NULL,
///     is_admin BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT profiles_account_id_key UNIQUE (account_id)
/// );
/// ```
///
/// # Ownership
///
/// - Deleting the account deletes the profile.
/// - Deleting the organization only clears `organization_id`.
/// - `profiles_account_id_key` keeps the account link one-to-one.

use crate::models::{account::Account, organization::Organization};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const PROFILE_COLUMNS: &str = "id, account_id, organization_id, is_admin, created_at, updated_at";

/// Profile row with raw references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    /// Primary key (UUID v4)
    pub id: Uuid,

    /// Owning account
    pub account_id: Option<Uuid>,

    /// Employer, if any
    pub organization_id: Option<Uuid>,

    /// Whether the recruiter administers their organization
    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile with its account and organization loaded
#[derive(Debug, Clone)]
pub struct ProfileDetail {
    pub profile: Profile,
    pub account: Option<Account>,
    pub organization: Option<Organization>,
}

/// Input for creating a profile
#[derive(Debug, Clone, Default)]
pub struct CreateProfile {
    pub account_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub is_admin: bool,
}

/// Partial update; only `Some` fields are written
///
/// `organization_id: Some(None)` detaches the profile from its organization.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub organization_id: Option<Option<Uuid>>,
    pub is_admin: Option<bool>,
}

/// Flat row of `profiles LEFT JOIN accounts LEFT JOIN organizations`
#[derive(Debug, sqlx::FromRow)]
struct ProfileDetailRow {
    id: Uuid,
    account_id: Option<Uuid>,
    organization_id: Option<Uuid>,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,

    account_email: Option<String>,
    account_name: Option<String>,
    account_password_hash: Option<String>,
    account_is_active: Option<bool>,
    account_is_staff: Option<bool>,
    account_last_active: Option<DateTime<Utc>>,
    account_date_joined: Option<DateTime<Utc>>,
    account_updated_at: Option<DateTime<Utc>>,

    organization_name: Option<String>,
    organization_active: Option<bool>,
    organization_website: Option<String>,
    organization_created_at: Option<DateTime<Utc>>,
    organization_updated_at: Option<DateTime<Utc>>,
}

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.account_id, p.organization_id, p.is_admin, p.created_at, p.updated_at,
           a.email AS account_email, a.name AS account_name,
           a.password_hash AS account_password_hash, a.is_active AS account_is_active,
           a.is_staff AS account_is_staff, a.last_active AS account_last_active,
           a.date_joined AS account_date_joined, a.updated_at AS account_updated_at,
           o.name AS organization_name, o.active AS organization_active,
           o.website AS organization_website, o.created_at AS organization_created_at,
           o.updated_at AS organization_updated_at
    FROM profiles p
    LEFT JOIN accounts a ON a.id = p.account_id
    LEFT JOIN organizations o ON o.id = p.organization_id
"#;

impl From<ProfileDetailRow> for ProfileDetail {
    fn from(row: ProfileDetailRow) -> Self {
        let account = match (
            row.account_id,
            row.account_email,
            row.account_password_hash,
            row.account_date_joined,
            row.account_updated_at,
        ) {
            (Some(id), Some(email), Some(password_hash), Some(date_joined), Some(updated_at)) => {
                Some(Account {
                    id,
                    email,
                    name: row.account_name.unwrap_or_default(),
                    password_hash,
                    is_active: row.account_is_active.unwrap_or(true),
                    is_staff: row.account_is_staff.unwrap_or(false),
                    last_active: row.account_last_active,
                    date_joined,
                    updated_at,
                })
            }
            _ => None,
        };

        let organization = match (
            row.organization_id,
            row.organization_name,
            row.organization_created_at,
            row.organization_updated_at,
        ) {
            (Some(id), Some(name), Some(created_at), Some(updated_at)) => Some(Organization {
                id,
                name,
                active: row.organization_active.unwrap_or(true),
                website: row.organization_website,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        ProfileDetail {
            profile: Profile {
                id: row.id,
                account_id: row.account_id,
                organization_id: row.organization_id,
                is_admin: row.is_admin,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            account,
            organization,
        }
    }
}

impl Profile {
    /// Inserts a new profile
    ///
    /// # Errors
    ///
    /// Fails with a unique violation if the account already has a profile,
    /// and with a foreign-key violation if a reference does not exist.
    pub async fn create<'e, E>(executor: E, data: CreateProfile) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO profiles (account_id, organization_id, is_admin) \
             VALUES ($1, $2, $3) RETURNING {PROFILE_COLUMNS}"
        );

        sqlx::query_as::<_, Profile>(&query)
            .bind(data.account_id)
            .bind(data.organization_id)
            .bind(data.is_admin)
            .fetch_one(executor)
            .await
    }

    /// Finds a profile by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");

        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Finds the profile owned by an account
    pub async fn find_by_account<'e, E>(
        executor: E,
        account_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE account_id = $1");

        sqlx::query_as::<_, Profile>(&query)
            .bind(account_id)
            .fetch_optional(executor)
            .await
    }

    /// Loads a profile together with its account and organization
    pub async fn find_detail<'e, E>(
        executor: E,
        id: Uuid,
    ) -> Result<Option<ProfileDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1");

        let row = sqlx::query_as::<_, ProfileDetailRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(row.map(ProfileDetail::from))
    }

    /// Lists profiles with accounts and organizations, oldest first
    pub async fn list_detail<'e, E>(
        executor: E,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<ProfileDetail>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{DETAIL_SELECT} ORDER BY p.created_at ASC, p.id ASC LIMIT $1 OFFSET $2");

        let rows = sqlx::query_as::<_, ProfileDetailRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await?;

        Ok(rows.into_iter().map(ProfileDetail::from).collect())
    }

    /// Lists the profiles attached to an organization
    pub async fn list_by_organization<'e, E>(
        executor: E,
        organization_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE organization_id = $1 ORDER BY created_at ASC"
        );

        sqlx::query_as::<_, Profile>(&query)
            .bind(organization_id)
            .fetch_all(executor)
            .await
    }

    /// Applies a partial update; `None` if the profile does not exist
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = String::from("UPDATE profiles SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.organization_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", organization_id = ${bind_count}"));
        }
        if data.is_admin.is_some() {
            bind_count += 1;
            query.push_str(&format!(", is_admin = ${bind_count}"));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {PROFILE_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Profile>(&query).bind(id);
        if let Some(organization_id) = data.organization_id {
            q = q.bind(organization_id);
        }
        if let Some(is_admin) = data.is_admin {
            q = q.bind(is_admin);
        }

        q.fetch_optional(executor).await
    }

    /// Deletes a profile; the account it references is left alone
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
