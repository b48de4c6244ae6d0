//! DevCMS Database Layer
//!
//! Thin async PostgreSQL layer used by the generator: a connection handle,
//! catalog queries for schema introspection, and site-scoped content queries.

pub mod pool;
pub mod queries;

pub use pool::{DbConfig, DbError, DbPool, DbResult, DEFAULT_DATABASE_URL, DEFAULT_SCHEMA};

/// Open a connection for the given settings.
pub async fn init_pool(config: &DbConfig) -> DbResult<DbPool> {
    DbPool::connect(config).await
}
