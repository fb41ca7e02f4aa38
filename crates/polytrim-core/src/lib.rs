//! polytrim-core: shared foundation for the polytrim analyzer.
//!
//! - Errors: one `thiserror` enum per subsystem, each with a stable error code
//! - Config: TOML-based, layered resolution (CLI > env > project > user > defaults)
//! - Tracing: `tracing` + `EnvFilter` driven by `POLYTRIM_LOG`
//! - Types: `FeatureId` and the hashing collections used across crates

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;
