//! Code generation errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation operation.
///
/// Per-artifact render failures are not represented here; they are recorded
/// in [`crate::GenerationResult::errors`].
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Component identifier '{component}' is produced by both '{first}' and '{second}'")]
    ComponentCollision {
        component: String,
        first: String,
        second: String,
    },

    #[error("Failed to prepare output directory {}: {source}", .path.display())]
    OutputPreparation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load templates: {0}")]
    TemplateDiscovery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
