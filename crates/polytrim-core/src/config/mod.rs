//! Configuration system for polytrim.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod output_config;
pub mod polytrim_config;

pub use analysis_config::{AnalysisConfig, MemberConflictPolicy};
pub use output_config::{ModuleFormat, OutputConfig};
pub use polytrim_config::{CliOverrides, PolytrimConfig};
