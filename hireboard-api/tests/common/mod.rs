//! Shared helpers for the serializer integration tests
//!
//! Like the store suites, these need `DATABASE_URL`; without it every test
//! returns early.
#![allow(dead_code)]

use hireboard_api::config::PaginationSettings;
use hireboard_api::serializers::account::AccountWrite;
use hireboard_api::serializers::organization::{
    create_organization, OrganizationRead, OrganizationWrite,
};
use hireboard_shared::db::migrations::run_migrations;
use hireboard_shared::db::pool::{create_pool, DatabaseConfig};
use sqlx::PgPool;
use uuid::Uuid;

/// Connects and applies the schema, or `None` when `DATABASE_URL` is unset
pub async fn test_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;

    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 0,
        acquire_timeout_seconds: 5,
        ..Default::default()
    })
    .await
    .expect("DATABASE_URL is set but the database is unreachable");

    run_migrations(&pool).await.expect("schema should apply");
    Some(pool)
}

/// Returns the pool, or skips the calling test
macro_rules! require_db {
    () => {
        match common::test_pool().await {
            Some(pool) => pool,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            }
        }
    };
}

pub fn pagination() -> PaginationSettings {
    PaginationSettings::default()
}

/// An email no other test run will use
pub fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Uuid::new_v4())
}

pub fn account_payload(email: &str, password: &str) -> AccountWrite {
    AccountWrite {
        email: email.to_string(),
        password: password.to_string(),
        name: "Robin Recruiter".to_string(),
    }
}

/// Creates an organization whose name starts with `name`
pub async fn seed_organization(pool: &PgPool, name: &str) -> OrganizationRead {
    create_organization(
        pool,
        OrganizationWrite {
            name: name.to_string(),
            active: true,
            website: Some("https://acme.example".to_string()),
        },
    )
    .await
    .expect("organization should be created")
}
