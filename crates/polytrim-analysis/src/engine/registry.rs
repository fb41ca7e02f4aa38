//! Pattern registry: catalog rules for the candidate set, indexed by the
//! syntactic shape the matcher looks up.

use polytrim_core::config::MemberConflictPolicy;
use polytrim_core::errors::CatalogError;
use polytrim_core::types::collections::SmallVec2;
use polytrim_core::types::{FeatureId, FxHashMap, FxHashSet};

use crate::catalog::{ArgumentPredicate, FeatureCatalog, Rule};

/// Per-call lookup indices borrowed from a catalog and a candidate list.
///
/// Global names and static-member owners hold one slot each; a later
/// registration for the same key displaces the earlier one.
#[derive(Debug, Default)]
pub struct PatternRegistry<'a> {
    globals: FxHashMap<&'a str, &'a FeatureId>,
    members: FxHashMap<&'a str, (&'a str, &'a FeatureId)>,
    methods: FxHashMap<&'a str, SmallVec2<&'a FeatureId>>,
    properties: FxHashMap<&'a str, SmallVec2<&'a FeatureId>>,
    calls: FxHashMap<&'a str, SmallVec2<(&'a FeatureId, ArgumentPredicate)>>,
    unmatched: Vec<&'a FeatureId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Global,
    Owner,
}

/// A one-slot key registered twice within one registry.
#[derive(Debug, Clone)]
struct Displacement<'a> {
    slot: Slot,
    key: &'a str,
    existing: &'a FeatureId,
    incoming: &'a FeatureId,
}

impl<'a> PatternRegistry<'a> {
    /// Build with the default last-wins policy. Never fails.
    pub fn build(catalog: &'a FeatureCatalog, candidates: &'a [FeatureId]) -> Self {
        let (registry, displaced) = Self::populate(catalog, candidates);
        for d in &displaced {
            tracing::debug!(
                key = d.key,
                existing = %d.existing,
                incoming = %d.incoming,
                "one-slot index key registered twice; keeping the later entry"
            );
        }
        registry
    }

    /// Build under `policy`. `Reject` fails on the first key registered twice.
    pub fn build_with_policy(
        catalog: &'a FeatureCatalog,
        candidates: &'a [FeatureId],
        policy: MemberConflictPolicy,
    ) -> Result<Self, CatalogError> {
        match policy {
            MemberConflictPolicy::LastWins => Ok(Self::build(catalog, candidates)),
            MemberConflictPolicy::Reject => {
                let (registry, displaced) = Self::populate(catalog, candidates);
                match displaced.into_iter().next() {
                    Some(d) => {
                        tracing::warn!(key = d.key, "conflicting registrations rejected");
                        let (existing, incoming) = (d.existing.to_string(), d.incoming.to_string());
                        Err(match d.slot {
                            Slot::Global => CatalogError::GlobalConflict {
                                name: d.key.to_string(),
                                existing,
                                incoming,
                            },
                            Slot::Owner => CatalogError::OwnerConflict {
                                owner: d.key.to_string(),
                                existing,
                                incoming,
                            },
                        })
                    }
                    None => Ok(registry),
                }
            }
        }
    }

    fn populate(
        catalog: &'a FeatureCatalog,
        candidates: &'a [FeatureId],
    ) -> (Self, Vec<Displacement<'a>>) {
        let wanted: FxHashSet<&str> = candidates.iter().map(FeatureId::as_str).collect();
        let mut registry = Self::default();
        let mut displaced = Vec::new();
        let mut with_rule: FxHashSet<&str> = FxHashSet::default();

        for entry in catalog.entries() {
            if !wanted.contains(entry.id.as_str()) {
                continue;
            }
            with_rule.insert(entry.id.as_str());
            let id = &entry.id;

            match &entry.rule {
                Rule::Global(name) => {
                    if let Some(existing) = registry.globals.insert(name.as_str(), id) {
                        if existing != id {
                            displaced.push(Displacement {
                                slot: Slot::Global,
                                key: name.as_str(),
                                existing,
                                incoming: id,
                            });
                        }
                    }
                }
                Rule::StaticMember { owner, member } => {
                    if let Some((old_member, existing)) =
                        registry.members.insert(owner.as_str(), (member.as_str(), id))
                    {
                        if existing != id || old_member != member.as_str() {
                            displaced.push(Displacement {
                                slot: Slot::Owner,
                                key: owner.as_str(),
                                existing,
                                incoming: id,
                            });
                        }
                    }
                }
                Rule::GenericMethod(name) => {
                    push_unique(registry.methods.entry(name.as_str()).or_default(), id)
                }
                Rule::GenericProperty(name) => {
                    push_unique(registry.properties.entry(name.as_str()).or_default(), id)
                }
                Rule::PredicateCall { callee, predicate } => {
                    let rules = registry.calls.entry(callee.as_str()).or_default();
                    rules.push((id, *predicate));
                }
            }
        }

        let mut seen = FxHashSet::default();
        registry.unmatched = candidates
            .iter()
            .filter(|id| !with_rule.contains(id.as_str()) && seen.insert(id.as_str()))
            .collect();

        tracing::debug!(
            candidates = candidates.len(),
            globals = registry.globals.len(),
            members = registry.members.len(),
            methods = registry.methods.len(),
            properties = registry.properties.len(),
            calls = registry.calls.len(),
            unmatched = registry.unmatched.len(),
            "pattern registry built"
        );
        (registry, displaced)
    }

    pub fn globals(&self) -> impl Iterator<Item = (&'a str, &'a FeatureId)> + '_ {
        self.globals.iter().map(|(name, id)| (*name, *id))
    }

    /// The `(member, feature)` registered for `owner`, if any.
    pub fn member(&self, owner: &str) -> Option<(&'a str, &'a FeatureId)> {
        self.members.get(owner).copied()
    }

    pub fn methods(&self, name: &str) -> &[&'a FeatureId] {
        self.methods.get(name).map(|ids| ids.as_slice()).unwrap_or(&[])
    }

    pub fn properties(&self, name: &str) -> &[&'a FeatureId] {
        self.properties
            .get(name)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn calls(&self, callee: &str) -> &[(&'a FeatureId, ArgumentPredicate)] {
        self.calls
            .get(callee)
            .map(|rules| rules.as_slice())
            .unwrap_or(&[])
    }

    /// Candidates with no catalog rule at all. Always part of the result.
    pub fn unmatched(&self) -> &[&'a FeatureId] {
        &self.unmatched
    }

    /// Every feature id reachable through an index.
    pub fn indexed_ids(&self) -> FxHashSet<&'a FeatureId> {
        let mut ids: FxHashSet<&'a FeatureId> = FxHashSet::default();
        ids.extend(self.globals.values().copied());
        ids.extend(self.members.values().map(|(_, id)| *id));
        ids.extend(self.methods.values().flatten().copied());
        ids.extend(self.properties.values().flatten().copied());
        ids.extend(self.calls.values().flatten().map(|(id, _)| *id));
        ids
    }

    /// True when no candidate can be recorded, by matching or fail-open.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
            && self.members.is_empty()
            && self.methods.is_empty()
            && self.properties.is_empty()
            && self.calls.is_empty()
            && self.unmatched.is_empty()
    }
}

fn push_unique<'a>(ids: &mut SmallVec2<&'a FeatureId>, id: &'a FeatureId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
