/// Organization wire shapes and CRUD
///
/// Listing follows the store's order: name ascending.

use crate::{
    config::PaginationSettings,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    serializers::{double_option, ListParams},
};
use hireboard_shared::models::organization::{
    CreateOrganization, Organization, UpdateOrganization,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidateUrl};

const INVALID_URL: &str = "Enter a valid URL.";
const WEBSITE_TOO_LONG: &str = "Ensure this field has no more than 200 characters.";

fn default_active() -> bool {
    true
}

/// Organization write shape
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrganizationWrite {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Ensure this field has between 1 and 255 characters."
    ))]
    pub name: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default)]
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub website: Option<String>,
}

/// Partial organization write shape
///
/// `"website": null` clears the website; omitting it leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganizationPatch {
    pub name: Option<String>,

    pub active: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
}

/// Organization read shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRead {
    pub id: Uuid,
    pub name: String,
    pub active: bool,
    pub website: Option<String>,
}

impl From<&Organization> for OrganizationRead {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id,
            name: org.name.clone(),
            active: org.active,
            website: org.website.clone(),
        }
    }
}

/// An empty website means "no website"
fn blank_to_none(website: Option<String>) -> Option<String> {
    website.filter(|w| !w.trim().is_empty())
}

impl OrganizationPatch {
    fn validate_fields(&self) -> ApiResult<()> {
        let mut details = Vec::new();

        if let Some(name) = &self.name {
            let len = name.chars().count();
            if len == 0 || len > 255 {
                details.push(("name", "Ensure this field has between 1 and 255 characters."));
            }
        }

        if let Some(Some(website)) = &self.website {
            if !website.trim().is_empty() {
                if !website.validate_url() {
                    details.push(("website", INVALID_URL));
                } else if website.chars().count() > 200 {
                    details.push(("website", WEBSITE_TOO_LONG));
                }
            }
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(
                details
                    .into_iter()
                    .map(|(field, message)| ValidationErrorDetail {
                        field: field.to_string(),
                        message: message.to_string(),
                    })
                    .collect(),
            ))
        }
    }
}

/// Creates an organization
pub async fn create_organization(
    pool: &PgPool,
    mut payload: OrganizationWrite,
) -> ApiResult<OrganizationRead> {
    payload.website = blank_to_none(payload.website);
    payload.validate()?;

    let org = Organization::create(
        pool,
        CreateOrganization {
            name: payload.name,
            active: payload.active,
            website: payload.website,
        },
    )
    .await?;

    info!(organization_id = %org.id, "Organization created");
    Ok(OrganizationRead::from(&org))
}

/// Applies a partial update
pub async fn update_organization(
    pool: &PgPool,
    id: Uuid,
    patch: OrganizationPatch,
) -> ApiResult<OrganizationRead> {
    patch.validate_fields()?;

    let org = Organization::update(
        pool,
        id,
        UpdateOrganization {
            name: patch.name,
            active: patch.active,
            website: patch.website.map(blank_to_none),
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))?;

    info!(organization_id = %org.id, "Organization updated");
    Ok(OrganizationRead::from(&org))
}

/// Retrieves one organization
pub async fn retrieve_organization(pool: &PgPool, id: Uuid) -> ApiResult<OrganizationRead> {
    Organization::find_by_id(pool, id)
        .await?
        .map(|org| OrganizationRead::from(&org))
        .ok_or_else(|| ApiError::NotFound("Organization not found".to_string()))
}

/// Lists organizations by name
pub async fn list_organizations(
    pool: &PgPool,
    params: ListParams,
    pagination: &PaginationSettings,
) -> ApiResult<Vec<OrganizationRead>> {
    let (limit, offset) = params.resolve(pagination);

    let orgs = Organization::list(pool, Some(limit), offset).await?;
    Ok(orgs.iter().map(OrganizationRead::from).collect())
}

/// Deletes an organization; its profiles lose the reference
pub async fn delete_organization(pool: &PgPool, id: Uuid) -> ApiResult<()> {
    if !Organization::delete(pool, id).await? {
        return Err(ApiError::NotFound("Organization not found".to_string()));
    }

    info!(organization_id = %id, "Organization deleted");
    Ok(())
}

/// Fails with a `company` field error unless the organization exists
pub(crate) async fn ensure_exists<'e, E>(executor: E, id: Uuid) -> ApiResult<()>
where
    E: PgExecutor<'e>,
{
    if Organization::exists(executor, id).await? {
        Ok(())
    } else {
        Err(ApiError::field(
            "company",
            format!("Invalid pk \"{}\" - object does not exist.", id),
        ))
    }
}
