//! Single-pass visitor over a `SyntaxTree`.

use rustc_hash::FxHashSet;

use super::types::{NodeId, NodeKind, PropertyKey, SyntaxTree};

/// A call or constructor invocation.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'t> {
    pub id: NodeId,
    pub callee: NodeId,
    pub arguments: &'t [NodeId],
}

/// A member access with its resolved key.
#[derive(Debug, Clone, Copy)]
pub struct MemberAccess<'t> {
    pub id: NodeId,
    pub object: NodeId,
    pub property: &'t PropertyKey,
}

/// Callbacks invoked by `SyntaxTree::walk`. All methods default to no-ops so
/// visitors only implement the node kinds they care about.
pub trait SyntaxVisitor {
    fn visit_program(&mut self, _tree: &SyntaxTree, _globals: &FxHashSet<String>) {}

    fn visit_call(&mut self, _tree: &SyntaxTree, _call: CallSite<'_>) {}

    fn visit_new(&mut self, _tree: &SyntaxTree, _call: CallSite<'_>) {}

    fn visit_member(&mut self, _tree: &SyntaxTree, _member: MemberAccess<'_>) {}

    /// Identifiers, string literals, spreads and uncategorized nodes.
    fn visit_other(&mut self, _tree: &SyntaxTree, _id: NodeId, _kind: &NodeKind) {}
}

impl SyntaxTree {
    /// Visit every node exactly once, in arena (pre-order) order.
    pub fn walk<V: SyntaxVisitor + ?Sized>(&self, visitor: &mut V) {
        for (id, node) in self.nodes() {
            match &node.kind {
                NodeKind::Program { globals } => visitor.visit_program(self, globals),
                NodeKind::Call { callee, arguments } => visitor.visit_call(
                    self,
                    CallSite {
                        id,
                        callee: *callee,
                        arguments,
                    },
                ),
                NodeKind::New { callee, arguments } => visitor.visit_new(
                    self,
                    CallSite {
                        id,
                        callee: *callee,
                        arguments,
                    },
                ),
                NodeKind::Member { object, property } => visitor.visit_member(
                    self,
                    MemberAccess {
                        id,
                        object: *object,
                        property,
                    },
                ),
                kind @ (NodeKind::Identifier { .. }
                | NodeKind::StringLiteral { .. }
                | NodeKind::Spread { .. }
                | NodeKind::Other { .. }) => visitor.visit_other(self, id, kind),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxTreeBuilder;

    #[derive(Default)]
    struct Counter {
        programs: usize,
        calls: usize,
        news: usize,
        members: usize,
        others: usize,
    }

    impl SyntaxVisitor for Counter {
        fn visit_program(&mut self, _: &SyntaxTree, _: &FxHashSet<String>) {
            self.programs += 1;
        }
        fn visit_call(&mut self, _: &SyntaxTree, _: CallSite<'_>) {
            self.calls += 1;
        }
        fn visit_new(&mut self, _: &SyntaxTree, _: CallSite<'_>) {
            self.news += 1;
        }
        fn visit_member(&mut self, _: &SyntaxTree, _: MemberAccess<'_>) {
            self.members += 1;
        }
        fn visit_other(&mut self, _: &SyntaxTree, _: NodeId, _: &NodeKind) {
            self.others += 1;
        }
    }

    #[test]
    fn test_walk_visits_every_node_once() {
        let mut b = SyntaxTreeBuilder::new(["Symbol"]);
        let root = b.root();
        b.method_call(root, "Symbol", "for", 1);
        b.construct(root, "Map", 0);
        let tree = b.build();

        let mut counter = Counter::default();
        tree.walk(&mut counter);
        assert_eq!(counter.programs, 1);
        assert_eq!(counter.calls, 1);
        assert_eq!(counter.news, 1);
        assert_eq!(counter.members, 1);
        // Symbol, the call argument, Map
        assert_eq!(counter.others, 3);
        assert_eq!(
            counter.programs + counter.calls + counter.news + counter.members + counter.others,
            tree.len()
        );
    }
}
