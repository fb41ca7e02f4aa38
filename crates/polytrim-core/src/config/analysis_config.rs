//! Analysis configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the pattern registry treats two static-member rules for the same owner.
///
/// The member index holds one `(member, feature)` pair per owner name, so a
/// second registration for `Math` (say) displaces the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberConflictPolicy {
    /// The later catalog entry replaces the earlier one.
    #[default]
    LastWins,
    /// Registry construction fails with `CatalogError::OwnerConflict` (or
    /// `GlobalConflict` for a global name).
    Reject,
}

impl MemberConflictPolicy {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last_wins" | "lastwins" => Some(Self::LastWins),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastWins => "last-wins",
            Self::Reject => "reject",
        }
    }
}

/// Configuration for candidate selection and classification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Candidate module selectors (`es.map`, `es.array.*`, `/^es\.promise/`).
    /// Default: `["es.*"]`.
    #[serde(default)]
    pub modules: Vec<String>,
    /// Selectors removed from the candidate set after alias expansion.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Static-member owner conflict policy. Default: last-wins.
    pub member_conflicts: Option<MemberConflictPolicy>,
    /// Extra catalog definitions merged after the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Treat files with syntax errors as failures. Default: false.
    pub fail_on_parse_errors: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective module selectors, defaulting to every `es.` module.
    pub fn effective_modules(&self) -> Vec<String> {
        if self.modules.is_empty() {
            vec!["es.*".to_string()]
        } else {
            self.modules.clone()
        }
    }

    pub fn effective_member_conflicts(&self) -> MemberConflictPolicy {
        self.member_conflicts.unwrap_or_default()
    }

    pub fn effective_fail_on_parse_errors(&self) -> bool {
        self.fail_on_parse_errors.unwrap_or(false)
    }
}
