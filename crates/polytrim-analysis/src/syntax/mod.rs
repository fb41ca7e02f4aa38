//! Normalized syntax tree consumed by the usage classifier.
//!
//! Any front end that can produce a `SyntaxTree` (node kinds, parent links,
//! program-level global bindings) satisfies the classifier. The tree-sitter
//! front end lives in `normalizer` and `scope`.

pub mod builder;
pub mod normalizer;
pub mod scope;
pub mod types;
pub mod visitor;

pub use builder::SyntaxTreeBuilder;
pub use normalizer::normalize;
pub use types::{Arguments, NodeId, NodeKind, PropertyKey, SyntaxNode, SyntaxTree};
pub use visitor::{CallSite, MemberAccess, SyntaxVisitor};
