//! Usage classification engine: Resolve → BuildRegistry → Traverse → Assemble.
//!
//! A `PatternRegistry` is built fresh per call from the catalog entries of the
//! alias-expanded candidates. A `TreeMatcher` visits every syntax node once and
//! records registry hits; the assembler adds the rule-less candidates
//! (fail-open) and deduplicates.

pub mod assembler;
pub mod classifier;
pub mod matcher;
pub mod pipeline;
pub mod prelude;
pub mod registry;
pub mod selection;

pub use classifier::{classify, Classifier, UsageReport};
pub use matcher::{MatchOutcome, TreeMatcher};
pub use pipeline::{AnalysisSession, FileAnalysis};
pub use prelude::{prepend_prelude, render_prelude, PreludeOptions};
pub use registry::PatternRegistry;
pub use selection::{known_ids, ModuleSelection, ModuleSelector};
