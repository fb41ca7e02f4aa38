//! Feature usage classifier: Resolve → BuildRegistry → Traverse → Assemble.

use std::borrow::Cow;

use polytrim_core::config::MemberConflictPolicy;
use polytrim_core::errors::CatalogError;
use polytrim_core::types::FeatureId;
use serde::Serialize;

use super::assembler::assemble;
use super::matcher::TreeMatcher;
use super::registry::PatternRegistry;
use crate::catalog::{AliasTable, CatalogFile, FeatureCatalog};
use crate::syntax::SyntaxTree;

/// Which requested features `tree` needs, using the built-in catalog and
/// alias table with last-wins conflict handling.
///
/// Never fails. Ids without a catalog rule are always returned. The result
/// is deduplicated; its order is unspecified.
pub fn classify<I, S>(candidates: I, tree: &SyntaxTree) -> Vec<FeatureId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Classifier::builtin().report_lenient(candidates, tree).features
}

/// Classification result with the detected / fail-open split.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UsageReport {
    /// Needed features: `detected` ∪ `fail_open`.
    pub features: Vec<FeatureId>,
    /// Features whose rule matched the tree.
    pub detected: Vec<FeatureId>,
    /// Candidates kept because no rule exists for them.
    pub fail_open: Vec<FeatureId>,
    /// Alias-expanded candidate count, duplicates included.
    pub candidates: usize,
    pub nodes_visited: usize,
}

impl UsageReport {
    /// Sort every list lexically.
    pub fn sorted(mut self) -> Self {
        self.features.sort();
        self.detected.sort();
        self.fail_open.sort();
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.features.iter().any(|f| f.as_str() == id)
    }
}

/// Catalog, alias table and conflict policy bundled for repeated use.
/// Borrows the built-in tables until extended.
#[derive(Debug, Clone)]
pub struct Classifier {
    catalog: Cow<'static, FeatureCatalog>,
    aliases: Cow<'static, AliasTable>,
    policy: MemberConflictPolicy,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Classifier {
    pub fn builtin() -> Self {
        Self {
            catalog: Cow::Borrowed(FeatureCatalog::builtin()),
            aliases: Cow::Borrowed(AliasTable::builtin()),
            policy: MemberConflictPolicy::default(),
        }
    }

    pub fn new(catalog: FeatureCatalog, aliases: AliasTable) -> Self {
        Self {
            catalog: Cow::Owned(catalog),
            aliases: Cow::Owned(aliases),
            policy: MemberConflictPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MemberConflictPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append a loaded catalog file: entries after the existing ones, aliases
    /// replacing same-named ones.
    pub fn extend(&mut self, file: CatalogFile) {
        self.catalog.to_mut().extend(file.entries);
        self.aliases.to_mut().extend(file.aliases);
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn policy(&self) -> MemberConflictPolicy {
        self.policy
    }

    /// Alias expansion of requested ids.
    pub fn resolve<I, S>(&self, requested: I) -> Vec<FeatureId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aliases.resolve(requested)
    }

    pub fn classify<I, S>(
        &self,
        candidates: I,
        tree: &SyntaxTree,
    ) -> Result<Vec<FeatureId>, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.report(candidates, tree)?.features)
    }

    /// Expand `candidates` through the alias table, then classify.
    pub fn report<I, S>(
        &self,
        candidates: I,
        tree: &SyntaxTree,
    ) -> Result<UsageReport, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = self.resolve(candidates);
        self.report_resolved(&resolved, tree)
    }

    /// Classify already-expanded candidates (no alias lookup).
    pub fn report_resolved(
        &self,
        resolved: &[FeatureId],
        tree: &SyntaxTree,
    ) -> Result<UsageReport, CatalogError> {
        let registry = PatternRegistry::build_with_policy(&self.catalog, resolved, self.policy)?;
        Ok(Self::run(&registry, resolved.len(), tree))
    }

    /// Like `report`, but a conflict never fails: last-wins applies.
    fn report_lenient<I, S>(&self, candidates: I, tree: &SyntaxTree) -> UsageReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = self.resolve(candidates);
        let registry = PatternRegistry::build(&self.catalog, &resolved);
        Self::run(&registry, resolved.len(), tree)
    }

    fn run(registry: &PatternRegistry<'_>, candidates: usize, tree: &SyntaxTree) -> UsageReport {
        let outcome = TreeMatcher::new(registry).run(tree);
        let nodes_visited = outcome.nodes_visited;
        let assembled = assemble(&outcome, registry.unmatched());
        let features = assembled.features();

        tracing::debug!(
            candidates,
            nodes = nodes_visited,
            detected = assembled.detected.len(),
            fail_open = assembled.fail_open.len(),
            "classified syntax tree"
        );

        UsageReport {
            features,
            detected: assembled.detected,
            fail_open: assembled.fail_open,
            candidates,
            nodes_visited,
        }
    }
}
