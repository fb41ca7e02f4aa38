//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, PolytrimErrorCode};

/// Errors that can occur while reading and parsing a source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar could not be loaded for {language}: {message}")]
    GrammarLoad { language: String, message: String },

    #[error("Tree-sitter produced no tree for {path}")]
    NoTree { path: PathBuf },

    #[error("Unsupported language: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("{path} contains {count} syntax error(s)")]
    SyntaxErrors { path: PathBuf, count: u32 },
}

impl PolytrimErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::PARSE_ERROR,
        }
    }
}
