//! Centralized error types for DevCMS.

use thiserror::Error;

/// Main error type for loading operations.
#[derive(Error, Debug)]
pub enum DevcmsError {
    #[error("Site not found: {0}")]
    SiteNotFound(String),

    #[error("Content loading failed: {0}")]
    ContentLoad(#[source] devcms_db::DbError),

    #[error("Schema introspection failed: {0}")]
    Introspection(#[source] devcms_db::DbError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for DevCMS operations.
pub type DevcmsResult<T> = Result<T, DevcmsError>;

impl DevcmsError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error means the site identifier did not resolve.
    pub fn is_site_not_found(&self) -> bool {
        matches!(self, Self::SiteNotFound(_))
    }
}
