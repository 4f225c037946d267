//! Per-workflow usage counts

use std::collections::BTreeMap;

use crate::workflow::{extract_references, ActionReference, WorkflowDocument};

/// Occurrences of each distinct reference within one workflow file.
///
/// Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageCount {
    counts: BTreeMap<ActionReference, u64>,
}

impl UsageCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the references extracted from a parsed document
    pub fn from_document(document: &WorkflowDocument) -> Self {
        extract_references(document).collect()
    }

    /// Record one occurrence
    pub fn record(&mut self, reference: ActionReference) {
        *self.counts.entry(reference).or_insert(0) += 1;
    }

    /// Number of distinct (name, version) pairs
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all occurrences
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of one reference, 0 when absent
    pub fn get(&self, reference: &ActionReference) -> u64 {
        self.counts.get(reference).copied().unwrap_or(0)
    }

    /// Entries in (name, version) order
    pub fn iter(&self) -> impl Iterator<Item = (&ActionReference, u64)> {
        self.counts.iter().map(|(reference, count)| (reference, *count))
    }
}

impl FromIterator<ActionReference> for UsageCount {
    fn from_iter<I: IntoIterator<Item = ActionReference>>(iter: I) -> Self {
        let mut usage = UsageCount::new();
        for reference in iter {
            usage.record(reference);
        }
        usage
    }
}

impl Extend<ActionReference> for UsageCount {
    fn extend<I: IntoIterator<Item = ActionReference>>(&mut self, iter: I) {
        for reference in iter {
            self.record(reference);
        }
    }
}
