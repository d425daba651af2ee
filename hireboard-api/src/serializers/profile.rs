/// Recruiter profile wire shapes and operations
///
/// Creating a profile also creates its account. Both inserts share one
/// transaction, so a failure after the account insert leaves nothing
/// behind.
///
/// # Example
///
/// ```json
/// {
///   "user": { "email": "rita@acme.example", "password": "hunter22", "name": "Rita" },
///   "company": "6f1c0a4e-1a7e-4a39-9a43-3f1d1b0c2d11",
///   "is_admin": true
/// }
/// ```

use crate::{
    config::PaginationSettings,
    error::{ApiError, ApiResult},
    serializers::{
        account::{self, AccountPatch, AccountRead, AccountWrite},
        double_option,
        organization::{self, OrganizationRead},
        ListParams,
    },
};
use hireboard_shared::{
    accounts::{self as account_manager, normalize_email, AccountError},
    models::{
        account::Account,
        profile::{CreateProfile, Profile, ProfileDetail, UpdateProfile},
    },
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Profile write shape
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileWrite {
    pub user: AccountWrite,

    #[serde(default)]
    pub company: Option<Uuid>,

    #[serde(default)]
    pub is_admin: bool,
}

/// Partial profile write shape
///
/// `"company": null` detaches the profile from its organization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub user: Option<AccountPatch>,

    #[serde(default, deserialize_with = "double_option")]
    pub company: Option<Option<Uuid>>,

    #[serde(default)]
    pub is_admin: Option<bool>,
}

/// Compact shape returned by writes: references as raw ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileCompact {
    pub id: Uuid,
    pub user: Option<Uuid>,
    pub company: Option<Uuid>,
    pub is_admin: bool,
}

/// Expanded shape returned by reads: account and organization inlined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileExpanded {
    pub id: Uuid,
    pub user: Option<AccountRead>,
    pub company: Option<OrganizationRead>,
    pub is_admin: bool,
}

impl From<&Profile> for ProfileCompact {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            user: profile.account_id,
            company: profile.organization_id,
            is_admin: profile.is_admin,
        }
    }
}

impl From<&ProfileDetail> for ProfileExpanded {
    fn from(detail: &ProfileDetail) -> Self {
        Self {
            id: detail.profile.id,
            user: detail.account.as_ref().map(AccountRead::from),
            company: detail.organization.as_ref().map(OrganizationRead::from),
            is_admin: detail.profile.is_admin,
        }
    }
}

fn profile_not_found() -> ApiError {
    ApiError::NotFound("Profile not found".to_string())
}

/// Creates an account and a profile for it
///
/// 1. The embedded account payload is validated.
/// 2. An already registered email fails with the `user_exists` conflict.
/// 3. The account and the profile are inserted in one transaction.
pub async fn create_profile(pool: &PgPool, payload: ProfileWrite) -> ApiResult<ProfileCompact> {
    payload
        .user
        .validate()
        .map_err(|e| ApiError::from(e).nested("user"))?;

    let email = normalize_email(&payload.user.email);

    let mut tx = pool.begin().await?;

    if let Some(company) = payload.company {
        organization::ensure_exists(&mut *tx, company).await?;
    }

    if Account::exists_by_email(&mut *tx, &email).await? {
        info!("Profile sign-up rejected: email already registered");
        return Err(ApiError::user_exists());
    }

    let account = account_manager::create_account(&mut *tx, payload.user.into())
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent sign-up
            AccountError::EmailTaken => ApiError::user_exists(),
            other => ApiError::from(other).nested("user"),
        })?;

    let profile = Profile::create(
        &mut *tx,
        CreateProfile {
            account_id: Some(account.id),
            organization_id: payload.company,
            is_admin: payload.is_admin,
        },
    )
    .await?;

    tx.commit().await?;

    info!(
        profile_id = %profile.id,
        account_id = %account.id,
        organization_id = ?profile.organization_id,
        "Profile created"
    );
    Ok(ProfileCompact::from(&profile))
}

/// Applies a partial update to a profile and its account
///
/// The embedded account payload, if present, is applied first (passwords
/// are re-hashed); profile fields follow. All of it commits or none of it
/// does.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    patch: ProfilePatch,
) -> ApiResult<ProfileCompact> {
    if let Some(user) = &patch.user {
        user.validate()
            .map_err(|e| ApiError::from(e).nested("user"))?;
    }

    let mut tx = pool.begin().await?;

    let profile = Profile::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(profile_not_found)?;

    if let Some(user) = patch.user {
        let account_id = profile
            .account_id
            .ok_or_else(|| ApiError::field("user", "This profile has no linked account."))?;
        let existing = Account::find_by_id(&mut *tx, account_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

        account::update_account(&mut *tx, &existing, user)
            .await
            .map_err(|e| e.nested("user"))?;
    }

    if let Some(Some(company)) = patch.company {
        organization::ensure_exists(&mut *tx, company).await?;
    }

    let profile = Profile::update(
        &mut *tx,
        id,
        UpdateProfile {
            organization_id: patch.company,
            is_admin: patch.is_admin,
        },
    )
    .await?
    .ok_or_else(profile_not_found)?;

    tx.commit().await?;

    info!(profile_id = %profile.id, "Profile updated");
    Ok(ProfileCompact::from(&profile))
}

/// Retrieves one profile in the expanded shape
pub async fn retrieve_profile(pool: &PgPool, id: Uuid) -> ApiResult<ProfileExpanded> {
    Profile::find_detail(pool, id)
        .await?
        .map(|detail| ProfileExpanded::from(&detail))
        .ok_or_else(profile_not_found)
}

/// Lists profiles in the expanded shape, oldest first
pub async fn list_profiles(
    pool: &PgPool,
    params: ListParams,
    pagination: &PaginationSettings,
) -> ApiResult<Vec<ProfileExpanded>> {
    let (limit, offset) = params.resolve(pagination);

    let details = Profile::list_detail(pool, Some(limit), offset).await?;
    Ok(details.iter().map(ProfileExpanded::from).collect())
}

/// Deletes a profile; its account is kept
pub async fn delete_profile(pool: &PgPool, id: Uuid) -> ApiResult<()> {
    if !Profile::delete(pool, id).await? {
        return Err(profile_not_found());
    }

    info!(profile_id = %id, "Profile deleted");
    Ok(())
}
