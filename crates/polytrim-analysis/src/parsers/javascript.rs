//! JavaScript / TypeScript parser.

use std::path::Path;
use std::time::Instant;

use polytrim_core::errors::ParseError;
use tree_sitter::Parser;

use super::error_tolerant::count_errors;
use super::language::Language;
use super::types::ParseResult;

/// Parser for the ECMAScript family. One instance per language; tree-sitter
/// parsers are not `Sync`, so callers keep one per thread.
pub struct JavaScriptParser {
    parser: Parser,
    language: Language,
}

impl JavaScriptParser {
    pub fn new(language: Language) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.ts_language())
            .map_err(|e| ParseError::GrammarLoad {
                language: language.name().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { parser, language })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse source text. `path` is only used for reporting.
    pub fn parse(&mut self, source: &str, path: &Path) -> Result<ParseResult, ParseError> {
        let start = Instant::now();
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: path.to_path_buf(),
            })?;

        let (error_count, error_ranges) = count_errors(tree.root_node());
        if error_count > 0 {
            tracing::warn!(
                file = %path.display(),
                errors = error_count,
                "source contains syntax errors; analyzing partial tree"
            );
        }

        Ok(ParseResult {
            file: path.display().to_string(),
            language: self.language,
            tree,
            error_count,
            error_ranges,
            parse_time_us: start.elapsed().as_micros() as u64,
        })
    }
}
