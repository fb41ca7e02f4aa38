//! Feature catalog: declarative `(FeatureId, Rule)` table plus the alias table.
//!
//! The built-in catalog and alias table are process-wide constants built on
//! first use. User catalogs loaded from TOML are appended after the built-in
//! entries.

pub mod aliases;
mod features;
pub mod loader;
pub mod rules;

use std::sync::LazyLock;

use polytrim_core::types::{FeatureId, FxHashMap, FxHashSet};

pub use aliases::AliasTable;
pub use loader::{CatalogFile, TomlCatalogLoader};
pub use rules::{ArgumentPredicate, CatalogEntry, Rule};

static BUILTIN: LazyLock<FeatureCatalog> =
    LazyLock::new(|| FeatureCatalog::new(features::builtin_entries()));

/// Ordered catalog entries. Registration order decides which entry keeps a
/// one-slot index key under the last-wins policy.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    entries: Vec<CatalogEntry>,
}

/// Two or more static-member rules sharing an owner name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerConflict {
    pub owner: String,
    /// Conflicting features in registration order (last one wins).
    pub features: Vec<FeatureId>,
}

impl FeatureCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> &'static FeatureCatalog {
        &BUILTIN
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append entries after the existing ones.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = CatalogEntry>) {
        self.entries.extend(entries);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id.as_str() == id)
    }

    /// Distinct feature ids, first-registration order.
    pub fn ids(&self) -> Vec<&FeatureId> {
        let mut seen = FxHashSet::default();
        self.entries
            .iter()
            .map(|e| &e.id)
            .filter(|id| seen.insert(id.as_str()))
            .collect()
    }

    /// Owners with more than one static-member rule under distinct ids.
    /// With all of them selected, only the last one can ever match.
    pub fn owner_conflicts(&self) -> Vec<OwnerConflict> {
        let mut by_owner: FxHashMap<&str, Vec<FeatureId>> = FxHashMap::default();
        let mut owners: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if let Rule::StaticMember { owner, .. } = &entry.rule {
                let features = by_owner.entry(owner.as_str()).or_insert_with(|| {
                    owners.push(owner.as_str());
                    Vec::new()
                });
                if !features.contains(&entry.id) {
                    features.push(entry.id.clone());
                }
            }
        }
        owners
            .into_iter()
            .filter_map(|owner| {
                let features = by_owner.remove(owner)?;
                (features.len() > 1).then(|| OwnerConflict {
                    owner: owner.to_string(),
                    features,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_core_entries() {
        let catalog = FeatureCatalog::builtin();
        assert!(catalog.contains("es.array.includes"));
        assert!(catalog.contains("es.error.cause"));
        assert!(catalog.contains("es.typed-array.uint8-clamped-array"));
        assert!(!catalog.contains("es.error.to-string"));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids = FeatureCatalog::builtin().ids();
        let unique: FxHashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids[0].as_str(), "es.aggregate-error.cause");
    }

    #[test]
    fn test_owner_conflicts_in_builtin() {
        let conflicts = FeatureCatalog::builtin().owner_conflicts();
        let math = conflicts.iter().find(|c| c.owner == "Math").unwrap();
        assert_eq!(math.features.len(), 17);
        assert_eq!(math.features.last().unwrap().as_str(), "es.math.trunc");
        assert!(conflicts.iter().all(|c| c.owner != "JSON"));
    }
}
