//! Error handling for polytrim.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod pipeline_error;

pub use catalog_error::CatalogError;
pub use config_error::ConfigError;
pub use error_code::PolytrimErrorCode;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
