//! Single-pass tree matcher.

use polytrim_core::types::{FeatureId, FxHashSet};

use super::registry::PatternRegistry;
use crate::syntax::{Arguments, CallSite, MemberAccess, NodeId, NodeKind, SyntaxTree, SyntaxVisitor};

/// Raw matcher output: ids in record order (may repeat) and the number of
/// nodes traversed.
#[derive(Debug, Default)]
pub struct MatchOutcome<'a> {
    pub matched: Vec<&'a FeatureId>,
    pub nodes_visited: usize,
}

/// Visitor recording every registry hit. Borrows the registry for the
/// duration of one traversal.
pub struct TreeMatcher<'r, 'a> {
    registry: &'r PatternRegistry<'a>,
    outcome: MatchOutcome<'a>,
}

impl<'r, 'a> TreeMatcher<'r, 'a> {
    pub fn new(registry: &'r PatternRegistry<'a>) -> Self {
        Self {
            registry,
            outcome: MatchOutcome::default(),
        }
    }

    /// Traverse `tree` once and return what matched.
    pub fn run(mut self, tree: &SyntaxTree) -> MatchOutcome<'a> {
        tree.walk(&mut self);
        self.outcome
    }

    fn record(&mut self, id: &'a FeatureId, site: NodeId) {
        tracing::trace!(feature = %id, node = site.0, "feature matched");
        self.outcome.matched.push(id);
    }

    fn invocation(&mut self, tree: &SyntaxTree, call: CallSite<'_>) {
        let Some(callee) = tree.identifier_name(call.callee) else {
            return;
        };
        let registry = self.registry;
        let rules = registry.calls(callee);
        if rules.is_empty() {
            return;
        }
        let arguments = Arguments::new(tree, call.arguments);
        for (id, predicate) in rules {
            if predicate.test(&arguments) {
                self.record(*id, call.id);
            }
        }
    }
}

impl<'a> SyntaxVisitor for TreeMatcher<'_, 'a> {
    fn visit_program(&mut self, tree: &SyntaxTree, globals: &FxHashSet<String>) {
        self.outcome.nodes_visited += 1;
        let root = tree.root();
        let hits: Vec<&'a FeatureId> = self
            .registry
            .globals()
            .filter(|(name, _)| globals.contains(*name))
            .map(|(_, id)| id)
            .collect();
        for id in hits {
            self.record(id, root);
        }
    }

    fn visit_call(&mut self, tree: &SyntaxTree, call: CallSite<'_>) {
        self.outcome.nodes_visited += 1;
        self.invocation(tree, call);
    }

    fn visit_new(&mut self, tree: &SyntaxTree, call: CallSite<'_>) {
        self.outcome.nodes_visited += 1;
        self.invocation(tree, call);
    }

    fn visit_member(&mut self, tree: &SyntaxTree, member: MemberAccess<'_>) {
        self.outcome.nodes_visited += 1;
        let Some(owner) = tree.identifier_name(member.object) else {
            return;
        };
        let Some(property) = member.property.name() else {
            return;
        };

        let registry = self.registry;
        if let Some((registered, id)) = registry.member(owner) {
            if registered == property {
                self.record(id, member.id);
            }
        }

        let generic = if tree.is_call_callee(member.id) {
            registry.methods(property)
        } else {
            registry.properties(property)
        };
        for id in generic {
            self.record(*id, member.id);
        }
    }

    fn visit_other(&mut self, _tree: &SyntaxTree, _id: NodeId, _kind: &NodeKind) {
        self.outcome.nodes_visited += 1;
    }
}
