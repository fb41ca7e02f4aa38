//! Feature catalog errors.

use super::error_code::{self, PolytrimErrorCode};

/// Errors raised while loading catalog data or building a strict registry.
///
/// The default classification path never produces these; they come from
/// user-supplied catalogs, module selectors, and the `reject` conflict policy.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog definition: {0}")]
    InvalidDefinition(String),

    #[error("Unknown rule kind '{kind}' for feature '{id}'")]
    UnknownRuleKind { id: String, kind: String },

    #[error("Feature '{id}' is missing required field '{field}'")]
    MissingField { id: String, field: String },

    #[error(
        "Static member owner '{owner}' registered twice: '{existing}' would be replaced by '{incoming}'"
    )]
    OwnerConflict {
        owner: String,
        existing: String,
        incoming: String,
    },

    #[error("Global '{name}' registered twice: '{existing}' would be replaced by '{incoming}'")]
    GlobalConflict {
        name: String,
        existing: String,
        incoming: String,
    },

    #[error("Invalid module selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

impl PolytrimErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OwnerConflict { .. } => error_code::OWNER_CONFLICT,
            Self::GlobalConflict { .. } => error_code::GLOBAL_CONFLICT,
            Self::InvalidSelector { .. } => error_code::INVALID_SELECTOR,
            _ => error_code::CATALOG_ERROR,
        }
    }
}
