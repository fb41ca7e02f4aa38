//! Parse output and source positions.

use serde::{Deserialize, Serialize};

use super::language::Language;

/// A parsed file: the tree-sitter tree plus error bookkeeping.
///
/// ERROR nodes do not abort analysis; the tree is still normalized and
/// classified, and the count is reported so hosts can decide.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub file: String,
    pub language: Language,
    pub tree: tree_sitter::Tree,
    pub error_count: u32,
    pub error_ranges: Vec<Range>,
    pub parse_time_us: u64,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn from_ts_node(node: &tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start: Position {
                line: start.row as u32,
                column: start.column as u32,
            },
            end: Position {
                line: end.row as u32,
                column: end.column as u32,
            },
        }
    }
}
