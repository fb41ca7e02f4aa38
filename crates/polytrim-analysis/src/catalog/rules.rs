//! Detection rules: how a feature shows up in syntax.

use std::fmt;

use polytrim_core::types::FeatureId;

use crate::syntax::Arguments;

/// Shape test over a call's argument list. Arguments are never evaluated;
/// counts are syntactic (`f(...xs)` has one argument).
#[derive(Clone, Copy)]
pub enum ArgumentPredicate {
    Exactly(usize),
    AtLeast(usize),
    Custom(fn(&Arguments<'_>) -> bool),
}

impl ArgumentPredicate {
    pub fn test(&self, arguments: &Arguments<'_>) -> bool {
        match self {
            Self::Exactly(n) => arguments.len() == *n,
            Self::AtLeast(n) => arguments.len() >= *n,
            Self::Custom(f) => f(arguments),
        }
    }
}

impl fmt::Debug for ArgumentPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "Exactly({n})"),
            Self::AtLeast(n) => write!(f, "AtLeast({n})"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// `name` is referenced as a free (global) identifier.
    Global(String),
    /// `owner.member` with `owner` a bare identifier.
    StaticMember { owner: String, member: String },
    /// `<anything>.name(...)`: accessed and immediately invoked.
    GenericMethod(String),
    /// `<anything>.name` not in callee position.
    GenericProperty(String),
    /// `callee(...)` or `new callee(...)` whose arguments satisfy `predicate`.
    PredicateCall {
        callee: String,
        predicate: ArgumentPredicate,
    },
}

impl Rule {
    /// Stable kind name, as used in catalog files.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Global(_) => "global",
            Self::StaticMember { .. } => "static-member",
            Self::GenericMethod(_) => "method",
            Self::GenericProperty(_) => "property",
            Self::PredicateCall { .. } => "call",
        }
    }
}

/// One `(FeatureId, Rule)` pair. A feature may have several entries.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: FeatureId,
    pub rule: Rule,
}

impl CatalogEntry {
    pub fn new(id: impl Into<FeatureId>, rule: Rule) -> Self {
        Self {
            id: id.into(),
            rule,
        }
    }

    pub fn global(id: &str, name: &str) -> Self {
        Self::new(id, Rule::Global(name.to_string()))
    }

    pub fn static_member(id: &str, owner: &str, member: &str) -> Self {
        Self::new(
            id,
            Rule::StaticMember {
                owner: owner.to_string(),
                member: member.to_string(),
            },
        )
    }

    pub fn method(id: &str, name: &str) -> Self {
        Self::new(id, Rule::GenericMethod(name.to_string()))
    }

    pub fn property(id: &str, name: &str) -> Self {
        Self::new(id, Rule::GenericProperty(name.to_string()))
    }

    pub fn call(id: &str, callee: &str, predicate: ArgumentPredicate) -> Self {
        Self::new(
            id,
            Rule::PredicateCall {
                callee: callee.to_string(),
                predicate,
            },
        )
    }
}
