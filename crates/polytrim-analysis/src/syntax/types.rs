//! Normalized syntax tree: the node shapes the usage matcher cares about,
//! plus an `Other` catch-all so every source node keeps a slot.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::parsers::types::Range;

/// Index of a node inside its `SyntaxTree` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Property key of a member access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// `object.name`
    Identifier(String),
    /// `object["name"]`
    StringLiteral(String),
    /// Any other key: `object[expr]`, `object[0]`, `object.#private`.
    Computed,
}

impl PropertyKey {
    /// The statically known property name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Identifier(name) | Self::StringLiteral(name) => Some(name),
            Self::Computed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root node. `globals` holds every name referenced in the program
    /// without a local declaration in any enclosing scope.
    Program { globals: FxHashSet<String> },
    /// `callee(arguments)`
    Call {
        callee: NodeId,
        arguments: SmallVec<[NodeId; 4]>,
    },
    /// `new callee(arguments)`; `new Foo` has no arguments.
    New {
        callee: NodeId,
        arguments: SmallVec<[NodeId; 4]>,
    },
    /// `object.property` / `object["property"]` / `object?.property`
    Member { object: NodeId, property: PropertyKey },
    Identifier { name: String },
    StringLiteral { value: String },
    /// `...argument`
    Spread { argument: NodeId },
    /// Everything else, tagged with the front end's kind name.
    Other { kind: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 4]>,
    pub range: Range,
}

/// Arena-backed syntax tree. Node 0 is always the `Program` root.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SyntaxNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Names bound as globals at the program root.
    pub fn globals(&self) -> Option<&FxHashSet<String>> {
        match self.kind(self.root()) {
            Some(NodeKind::Program { globals }) => Some(globals),
            _ => None,
        }
    }

    /// True if `name` is referenced as a free identifier in the program.
    pub fn is_global(&self, name: &str) -> bool {
        self.globals().is_some_and(|g| g.contains(name))
    }

    /// Name of a bare identifier node.
    pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            Some(NodeKind::Identifier { name }) => Some(name),
            _ => None,
        }
    }

    /// True if `id` is the callee of the enclosing call expression, looking
    /// through parentheses and TypeScript non-null assertions (`(a.b)()`,
    /// `a.b!()`). Being an argument of a call does not count.
    pub fn is_call_callee(&self, id: NodeId) -> bool {
        let mut parent = self.parent(id);
        while let Some(p) = parent {
            match self.kind(p) {
                Some(NodeKind::Other { kind }) if is_transparent(kind) => parent = self.parent(p),
                Some(NodeKind::Call { callee, .. }) => return *callee == id,
                _ => return false,
            }
        }
        false
    }
}

/// Front-end kinds that wrap a single expression without changing what it
/// refers to.
pub(crate) fn is_transparent(kind: &str) -> bool {
    matches!(kind, "parenthesized_expression" | "non_null_expression")
}

/// Read-only view of a call's argument list, handed to argument predicates.
/// Exposes shape only; values are never evaluated.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'t> {
    tree: &'t SyntaxTree,
    ids: &'t [NodeId],
}

impl<'t> Arguments<'t> {
    pub fn new(tree: &'t SyntaxTree, ids: &'t [NodeId]) -> Self {
        Self { tree, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'t NodeKind> {
        self.ids.get(index).and_then(|id| self.tree.kind(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'t NodeKind> + 't {
        let (tree, ids) = (self.tree, self.ids);
        ids.iter().filter_map(move |id| tree.kind(*id))
    }

    /// True if any argument is a spread (`f(...xs)`), which makes the
    /// runtime argument count unknowable.
    pub fn has_spread(&self) -> bool {
        self.iter().any(|k| matches!(k, NodeKind::Spread { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_key_name() {
        assert_eq!(PropertyKey::Identifier("at".into()).name(), Some("at"));
        assert_eq!(PropertyKey::StringLiteral("flags".into()).name(), Some("flags"));
        assert_eq!(PropertyKey::Computed.name(), None);
    }
}
