//! Generation result and its concurrent accumulator.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Aggregated outcome of one component generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// False only when the run could not start (output or template setup
    /// failed). Individual render failures leave this true.
    pub success: bool,
    /// Paths of written files, sorted.
    pub generated_files: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub execution_time_ms: u64,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.generated_files.len()
    }
}

/// Append-only collector shared by concurrently running generation tasks.
///
/// The lock is only held for a single push.
#[derive(Debug)]
pub(crate) struct ResultCollector {
    inner: Mutex<GenerationResult>,
}

impl ResultCollector {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(GenerationResult {
                success: true,
                ..Default::default()
            }),
        }
    }

    fn with<F: FnOnce(&mut GenerationResult)>(&self, f: F) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    pub(crate) fn file(&self, path: String) {
        self.with(|r| r.generated_files.push(path));
    }

    pub(crate) fn error(&self, message: String) {
        self.with(|r| r.errors.push(message));
    }

    pub(crate) fn warning(&self, message: String) {
        self.with(|r| r.warnings.push(message));
    }

    /// Record a fatal error: the run is reported as failed.
    pub(crate) fn fail(&self, message: String) {
        self.with(|r| {
            r.success = false;
            r.errors.push(message);
        });
    }

    pub(crate) fn finish(self, elapsed: Duration) -> GenerationResult {
        let mut result = self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        result.generated_files.sort();
        result.execution_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        result
    }
}
