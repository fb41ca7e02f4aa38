//! Composite and legacy module ids, expanded before matching.

use std::sync::LazyLock;

use polytrim_core::types::{FeatureId, FxHashMap};

static BUILTIN: LazyLock<AliasTable> = LazyLock::new(|| {
    let mut table = AliasTable::default();
    for (alias, targets) in BUILTIN_ALIASES {
        table.insert(alias, targets.iter().copied().map(FeatureId::from).collect());
    }
    table
});

/// core-js 3 aliases removed in core-js 4.
const BUILTIN_ALIASES: [(&str, &[&str]); 8] = [
    ("es.aggregate-error", &["es.aggregate-error.constructor"]),
    ("es.data-view", &["es.data-view.constructor"]),
    ("es.map", &["es.map.constructor"]),
    (
        "es.promise",
        &[
            "es.promise.constructor",
            "es.promise.all",
            "es.promise.catch",
            "es.promise.race",
            "es.promise.reject",
            "es.promise.resolve",
        ],
    ),
    ("es.set", &["es.set.constructor"]),
    (
        "es.symbol",
        &[
            "es.symbol.constructor",
            "es.symbol.for",
            "es.symbol.key-for",
            "es.json.stringify",
            "es.object.get-own-property-symbols",
        ],
    ),
    ("es.weak-set", &["es.weak-set.constructor"]),
    ("es.weak-map", &["es.weak-map.constructor"]),
];

/// Alias id → ordered concrete ids. Expansion is a single level: targets are
/// not expanded again.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: FxHashMap<String, Vec<FeatureId>>,
}

impl AliasTable {
    pub fn builtin() -> &'static AliasTable {
        &BUILTIN
    }

    /// Insert or replace an alias.
    pub fn insert(&mut self, alias: impl Into<String>, targets: Vec<FeatureId>) {
        self.entries.insert(alias.into(), targets);
    }

    pub fn get(&self, alias: &str) -> Option<&[FeatureId]> {
        self.entries.get(alias).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand requested ids in place, preserving order. Duplicates survive;
    /// unknown ids pass through unvalidated.
    pub fn resolve<I, S>(&self, requested: I) -> Vec<FeatureId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for id in requested {
            let id = id.as_ref();
            match self.entries.get(id) {
                Some(targets) => resolved.extend(targets.iter().cloned()),
                None => resolved.push(FeatureId::from(id)),
            }
        }
        resolved
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn targets(&self) -> impl Iterator<Item = &FeatureId> {
        self.entries.values().flatten()
    }

    /// Merge `other` over `self`; aliases present in both take `other`'s targets.
    pub fn extend(&mut self, other: AliasTable) {
        self.entries.extend(other.entries);
    }
}
