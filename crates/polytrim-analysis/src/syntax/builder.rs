//! Incremental construction of a `SyntaxTree`.
//!
//! The tree-sitter normalizer builds through this API, and so can any other
//! front end: the matcher only needs node kinds, parent links and the
//! program's global bindings.

use rustc_hash::FxHashSet;
use smallvec::{smallvec, SmallVec};

use super::types::{NodeId, NodeKind, PropertyKey, SyntaxNode, SyntaxTree};
use crate::parsers::types::Range;

pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTreeBuilder {
    /// Start a tree whose program root binds `globals`.
    pub fn new<I, S>(globals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_capacity(globals.into_iter().map(Into::into).collect(), 1)
    }

    pub fn with_capacity(globals: FxHashSet<String>, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SyntaxNode {
            kind: NodeKind::Program { globals },
            parent: None,
            children: SmallVec::new(),
            range: Range::default(),
        });
        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_root_range(&mut self, range: Range) {
        self.nodes[0].range = range;
    }

    /// Append `kind` as the last child of `parent`.
    ///
    /// # Panics
    /// If `parent` was not produced by this builder.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind, range: Range) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes[parent.index()].children.push(id);
        self.nodes.push(SyntaxNode {
            kind,
            parent: Some(parent),
            children: SmallVec::new(),
            range,
        });
        id
    }

    /// Replace the kind of an already pushed node. Lets front ends allocate
    /// children before the parent's kind (which refers to them) is known.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    pub fn identifier(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(
            parent,
            NodeKind::Identifier {
                name: name.to_string(),
            },
            Range::default(),
        )
    }

    /// `callee(arg0, arg1, ...)` with `arg_count` opaque arguments.
    pub fn call(&mut self, parent: NodeId, callee: &str, arg_count: usize) -> NodeId {
        let call = self.placeholder(parent, "call_expression");
        let callee = self.identifier(call, callee);
        let arguments = self.opaque_arguments(call, arg_count);
        self.set_kind(call, NodeKind::Call { callee, arguments });
        call
    }

    /// `new callee(arg0, ...)`
    pub fn construct(&mut self, parent: NodeId, callee: &str, arg_count: usize) -> NodeId {
        let new = self.placeholder(parent, "new_expression");
        let callee = self.identifier(new, callee);
        let arguments = self.opaque_arguments(new, arg_count);
        self.set_kind(new, NodeKind::New { callee, arguments });
        new
    }

    /// `object.property` where `object` is a bare identifier.
    pub fn member(&mut self, parent: NodeId, object: &str, property: PropertyKey) -> NodeId {
        let member = self.placeholder(parent, "member_expression");
        let object = self.identifier(member, object);
        self.set_kind(member, NodeKind::Member { object, property });
        member
    }

    /// `object.method(arg0, ...)`
    pub fn method_call(
        &mut self,
        parent: NodeId,
        object: &str,
        method: &str,
        arg_count: usize,
    ) -> NodeId {
        let call = self.placeholder(parent, "call_expression");
        let callee = self.member(call, object, PropertyKey::Identifier(method.to_string()));
        let arguments = self.opaque_arguments(call, arg_count);
        self.set_kind(call, NodeKind::Call { callee, arguments });
        call
    }

    pub fn build(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }

    fn placeholder(&mut self, parent: NodeId, kind: &'static str) -> NodeId {
        self.push(parent, NodeKind::Other { kind }, Range::default())
    }

    fn opaque_arguments(&mut self, parent: NodeId, count: usize) -> SmallVec<[NodeId; 4]> {
        let mut arguments = smallvec![];
        for _ in 0..count {
            arguments.push(self.placeholder(parent, "expression"));
        }
        arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_call_links() {
        let mut b = SyntaxTreeBuilder::new(["Promise"]);
        let root = b.root();
        let call = b.method_call(root, "foo", "catch", 1);
        let tree = b.build();

        let Some(NodeKind::Call { callee, arguments }) = tree.kind(call) else {
            panic!("expected call");
        };
        assert_eq!(arguments.len(), 1);
        assert!(tree.is_call_callee(*callee));
        assert_eq!(tree.parent(*callee), Some(call));
        assert!(tree.is_global("Promise"));
        assert!(!tree.is_global("foo"));
    }

    #[test]
    fn test_argument_is_not_callee() {
        let mut b = SyntaxTreeBuilder::new(Vec::<String>::new());
        let root = b.root();
        let call = b.call(root, "f", 0);
        let arg = b.member(call, "re", PropertyKey::Identifier("flags".into()));
        let tree = b.build();
        assert!(!tree.is_call_callee(arg));
    }
}
