//! PolytrimErrorCode trait for host-facing error reporting.

/// Every error enum implements this to provide a structured error code string
/// that bundler hosts and the CLI can match on without parsing messages.
pub trait PolytrimErrorCode {
    /// Returns the error code string (e.g., "PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const OWNER_CONFLICT: &str = "OWNER_CONFLICT";
pub const GLOBAL_CONFLICT: &str = "GLOBAL_CONFLICT";
pub const INVALID_SELECTOR: &str = "INVALID_SELECTOR";
