//! Shared data types for polytrim.

pub mod collections;
pub mod identifiers;

pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::FeatureId;
