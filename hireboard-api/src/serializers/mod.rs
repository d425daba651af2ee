/// Wire shapes and the operations that move them in and out of the stores
///
/// - `account`: account write/read shapes, create and update
/// - `organization`: organization CRUD with URL validation
/// - `profile`: recruiter profiles, created together with their account
/// - `auth_token`: email/password credential verification
///
/// Write operations return compact shapes (references as ids); read
/// operations return expanded shapes with related records inlined.

use crate::config::PaginationSettings;
use serde::{Deserialize, Deserializer};

pub mod account;
pub mod auth_token;
pub mod organization;
pub mod profile;

/// Query parameters accepted by list operations
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    /// Resolves to `(limit, offset)` within the configured bounds
    pub fn resolve(&self, pagination: &PaginationSettings) -> (i64, i64) {
        (
            pagination.clamp(self.limit),
            self.offset.unwrap_or(0).max(0),
        )
    }
}

/// Deserializes a field that distinguishes "absent" from "null"
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// a missing field stays `None`, `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
