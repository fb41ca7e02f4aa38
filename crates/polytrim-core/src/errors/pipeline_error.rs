//! Pipeline errors and non-fatal error collection.

use super::error_code::PolytrimErrorCode;
use super::{CatalogError, ConfigError, ParseError};

/// Errors that can occur while running the file analysis pipeline.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PolytrimErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Batch output plus the per-file failures met along the way. A failed file
/// is reported here and skipped; the rest of the batch still runs.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    pub data: T,
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// No file failed.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
