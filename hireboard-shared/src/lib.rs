//! # Hireboard Shared Library
//!
//! Records and primitives behind the Hireboard recruiting backend.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and schema bootstrap
//! - `models`: account, organization and profile records with their queries
//! - `accounts`: password-aware account writes
//! - `auth`: password hashing and email/password authentication

pub mod accounts;
pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Hireboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
