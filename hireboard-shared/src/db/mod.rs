/// Database layer
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: embedded schema bootstrap
///
/// Store records and their queries live in [`crate::models`].

pub mod migrations;
pub mod pool;
