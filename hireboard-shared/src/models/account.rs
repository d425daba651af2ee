/// Account model and database operations
///
/// An account is the authenticatable identity behind a recruiter profile.
/// Rows here never carry a plaintext password; hashing happens in
/// [`crate::accounts`] before anything reaches these queries.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email CITEXT NOT NULL,
///     name VARCHAR(255) NOT NULL DEFAULT '',
///     password_hash VARCHAR(255) NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     is_staff BOOLEAN NOT NULL DEFAULT FALSE,
///     last_active TIMESTAMPTZ,
///     date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT accounts_email_key UNIQUE (email)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use hireboard_shared::models::account::Account;
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if let Some(account) = Account::find_by_email(&pool, "jane@example.com").await? {
///     println!("{} joined {}", account.email, account.date_joined);
/// }
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str =
    "id, email, name, password_hash, is_active, is_staff, last_active, date_joined, updated_at";

/// Account row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Primary key (UUID v4)
    pub id: Uuid,

    /// Login identity, unique and compared case-insensitively (CITEXT)
    pub email: String,

    /// Display name, empty when not provided
    pub name: String,

    /// Argon2id PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Inactive accounts cannot authenticate
    pub is_active: bool,

    /// Staff accounts are created by operators, not by profile sign-up
    pub is_staff: bool,

    /// Last time an external collaborator recorded activity
    pub last_active: Option<DateTime<Utc>>,

    /// Creation time
    pub date_joined: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting an account
///
/// `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_staff: bool,
}

/// Partial update; only `Some` fields are written
#[derive(Debug, Clone, Default)]
pub struct UpdateAccount {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

impl UpdateAccount {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.name.is_none()
            && self.password_hash.is_none()
            && self.is_active.is_none()
            && self.is_staff.is_none()
    }
}

impl Account {
    /// Inserts a new account
    ///
    /// # Errors
    ///
    /// A duplicate email surfaces as a database error whose
    /// `is_unique_violation()` is true; [`crate::accounts`] translates it.
    pub async fn create<'e, E>(executor: E, data: CreateAccount) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO accounts (email, name, password_hash, is_staff) \
             VALUES ($1, $2, $3, $4) RETURNING {ACCOUNT_COLUMNS}"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(data.email)
            .bind(data.name)
            .bind(data.password_hash)
            .bind(data.is_staff)
            .fetch_one(executor)
            .await
    }

    /// Finds an account by ID
    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Finds an account by email (case-insensitive)
    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = $1::citext");

        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Checks whether an email is already registered
    pub async fn exists_by_email<'e, E>(executor: E, email: &str) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1::citext)")
            .bind(email)
            .fetch_one(executor)
            .await
    }

    /// Applies a partial update
    ///
    /// `updated_at` is always bumped. Returns `None` if the account does not
    /// exist.
    pub async fn update<'e, E>(
        executor: E,
        id: Uuid,
        data: UpdateAccount,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let mut query = String::from("UPDATE accounts SET updated_at = NOW()");
        let mut bind_count = 1;

        for (column, present) in [
            ("email", data.email.is_some()),
            ("name", data.name.is_some()),
            ("password_hash", data.password_hash.is_some()),
            ("is_active", data.is_active.is_some()),
            ("is_staff", data.is_staff.is_some()),
        ] {
            if present {
                bind_count += 1;
                query.push_str(&format!(", {column} = ${bind_count}"));
            }
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {ACCOUNT_COLUMNS}"));

        // Bind order must match the column order above
        let mut q = sqlx::query_as::<_, Account>(&query).bind(id);
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(is_active) = data.is_active {
            q = q.bind(is_active);
        }
        if let Some(is_staff) = data.is_staff {
            q = q.bind(is_staff);
        }

        q.fetch_optional(executor).await
    }

    /// Deletes an account
    ///
    /// The linked profile, if any, is removed by `ON DELETE CASCADE`.
    /// Returns false if nothing was deleted.
    pub async fn delete<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Records activity for the account
    pub async fn touch_last_active<'e, E>(executor: E, id: Uuid) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE accounts SET last_active = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists accounts, newest first
    pub async fn list<'e, E>(executor: E, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY date_joined DESC LIMIT $1 OFFSET $2"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
            .fetch_one(executor)
            .await
    }

    /// Counts accounts with the given email; at most one by construction
    pub async fn count_by_email<'e, E>(executor: E, email: &str) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE email = $1::citext")
            .bind(email)
            .fetch_one(executor)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_account_default_is_empty() {
        let update = UpdateAccount::default();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_account_with_field_is_not_empty() {
        let update = UpdateAccount {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let account = Account {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            is_active: true,
            is_staff: false,
            last_active: None,
            date_joined: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }
}
