//! Hash collections and inline vectors shared by the analyzer crates.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec for per-name feature lists (usually one or two ids share a name).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
