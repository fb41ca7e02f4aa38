//! Tree-sitter parser subsystem for JavaScript, TypeScript and TSX.

pub mod error_tolerant;
pub mod javascript;
pub mod language;
pub mod types;

pub use javascript::JavaScriptParser;
pub use language::Language;
pub use types::{ParseResult, Position, Range};
