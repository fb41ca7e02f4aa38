//! Result assembly: matched ids plus fail-open ids, deduplicated.

use polytrim_core::types::{FeatureId, FxHashSet};

use super::matcher::MatchOutcome;

/// Detected and fail-open ids, each deduplicated in first-seen order.
#[derive(Debug, Default)]
pub struct Assembled {
    pub detected: Vec<FeatureId>,
    pub fail_open: Vec<FeatureId>,
}

impl Assembled {
    /// Union of both groups, deduplicated. Order carries no meaning.
    pub fn features(&self) -> Vec<FeatureId> {
        dedup(self.detected.iter().chain(&self.fail_open))
    }
}

pub fn assemble(outcome: &MatchOutcome<'_>, unmatched: &[&FeatureId]) -> Assembled {
    Assembled {
        detected: dedup(outcome.matched.iter().copied()),
        fail_open: dedup(unmatched.iter().copied()),
    }
}

fn dedup<'a>(ids: impl IntoIterator<Item = &'a FeatureId>) -> Vec<FeatureId> {
    let mut seen: FxHashSet<&FeatureId> = FxHashSet::default();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_is_deduplicated() {
        let a = FeatureId::from("es.array.includes");
        let b = FeatureId::from("es.string.pad-start");
        let outcome = MatchOutcome {
            matched: vec![&a, &a],
            nodes_visited: 3,
        };
        let assembled = assemble(&outcome, &[&b, &b]);
        assert_eq!(assembled.detected, vec![a.clone()]);
        assert_eq!(assembled.fail_open, vec![b.clone()]);
        assert_eq!(assembled.features(), vec![a, b]);
    }
}
