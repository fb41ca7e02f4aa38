//! polytrim-analysis: decides which polyfill modules a program actually uses.
//!
//! - Catalog: declarative (feature id, rule) table and the alias table
//! - Syntax: normalized syntax tree, scope pass, tree-sitter lowering
//! - Parsers: tree-sitter JavaScript / TypeScript front end
//! - Engine: pattern registry, single-pass tree matcher, result assembly,
//!   candidate selection, import prelude rendering, file pipeline

pub mod catalog;
pub mod engine;
pub mod parsers;
pub mod syntax;

pub use catalog::{AliasTable, CatalogEntry, FeatureCatalog, Rule};
pub use engine::classifier::{classify, Classifier, UsageReport};
pub use engine::pipeline::{AnalysisSession, FileAnalysis};
pub use parsers::{JavaScriptParser, Language};
pub use polytrim_core::types::FeatureId;
pub use syntax::{SyntaxTree, SyntaxTreeBuilder};
