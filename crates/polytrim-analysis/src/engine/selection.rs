//! Module selection: turn `modules` / `exclude` selectors into a candidate list.
//!
//! Selector forms:
//! - `es.array.at`: one id, kept even if no catalog knows it
//! - `es.array.*`: every known id starting with `es.array.`
//! - `/^es\.(map|set)\./`: every known id matching the regex
//! - `core-js/es`, `core-js/modules/es.map.js`: import-path spellings

use polytrim_core::errors::CatalogError;
use polytrim_core::types::{FeatureId, FxHashSet};
use regex::Regex;

use crate::catalog::{AliasTable, FeatureCatalog};

#[derive(Debug, Clone)]
pub enum ModuleSelector {
    Exact(String),
    /// Includes the trailing dot; empty matches everything.
    Prefix(String),
    Pattern(Regex),
}

impl ModuleSelector {
    pub fn parse(selector: &str) -> Result<Self, CatalogError> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Err(CatalogError::InvalidSelector {
                selector: selector.to_string(),
                message: "empty selector".to_string(),
            });
        }

        if let Some(pattern) = selector
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
            .filter(|p| !p.is_empty())
        {
            let regex = Regex::new(pattern).map_err(|e| CatalogError::InvalidSelector {
                selector: selector.to_string(),
                message: e.to_string(),
            })?;
            return Ok(Self::Pattern(regex));
        }

        if let Some(path) = selector.strip_prefix("core-js/") {
            let path = path.strip_prefix("modules/").unwrap_or(path);
            let path = path.strip_suffix(".js").unwrap_or(path);
            // `core-js/es` names a namespace, `core-js/modules/es.map` one module.
            return Ok(if path.contains('.') {
                Self::Exact(path.to_string())
            } else {
                Self::Prefix(format!("{path}."))
            });
        }

        if selector == "*" {
            return Ok(Self::Prefix(String::new()));
        }
        if let Some(prefix) = selector.strip_suffix('*') {
            return Ok(Self::Prefix(prefix.to_string()));
        }
        Ok(Self::Exact(selector.to_string()))
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Exact(exact) => exact == id,
            Self::Prefix(prefix) => id.starts_with(prefix.as_str()),
            Self::Pattern(regex) => regex.is_match(id),
        }
    }
}

/// Parsed include and exclude selectors.
#[derive(Debug, Clone)]
pub struct ModuleSelection {
    include: Vec<ModuleSelector>,
    exclude: Vec<ModuleSelector>,
}

impl ModuleSelection {
    pub fn parse<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, CatalogError> {
        let parse_all = |selectors: &[S]| {
            selectors
                .iter()
                .map(|s| ModuleSelector::parse(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            include: parse_all(include)?,
            exclude: parse_all(exclude)?,
        })
    }

    /// Expand include selectors over `universe`, in universe order. Exact
    /// selectors for ids outside the universe are appended unchanged.
    pub fn candidates(&self, universe: &[&str]) -> Vec<FeatureId> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut selected = Vec::new();
        for id in universe {
            if self.include.iter().any(|s| s.matches(id)) && seen.insert(*id) {
                selected.push(FeatureId::from(*id));
            }
        }
        for selector in &self.include {
            if let ModuleSelector::Exact(id) = selector {
                if seen.insert(id.as_str()) {
                    selected.push(FeatureId::from(id.as_str()));
                }
            }
        }
        selected
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.exclude.iter().any(|s| s.matches(id))
    }

    /// Drop excluded ids. Applied after alias expansion so excluding a leaf
    /// id also removes it when it arrives through an alias.
    pub fn apply_exclude(&self, resolved: Vec<FeatureId>) -> Vec<FeatureId> {
        if self.exclude.is_empty() {
            return resolved;
        }
        resolved
            .into_iter()
            .filter(|id| !self.is_excluded(id.as_str()))
            .collect()
    }
}

/// Every id a selector can expand to: catalog ids, alias keys and alias
/// targets, deduplicated. Catalog order first, then aliases sorted.
pub fn known_ids<'a>(catalog: &'a FeatureCatalog, aliases: &'a AliasTable) -> Vec<&'a str> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut ids: Vec<&'a str> = Vec::new();
    for id in catalog.ids() {
        if seen.insert(id.as_str()) {
            ids.push(id.as_str());
        }
    }
    let mut alias_ids: Vec<&'a str> = aliases
        .keys()
        .chain(aliases.targets().map(FeatureId::as_str))
        .filter(|id| !seen.contains(id))
        .collect();
    alias_ids.sort_unstable();
    alias_ids.dedup();
    ids.extend(alias_ids);
    ids
}
