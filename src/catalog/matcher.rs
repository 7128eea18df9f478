//! Symptom matching logic.
//!
//! # Design Decisions
//! - The query is matched as a substring of the stored pattern string, not by
//!   token-set equality. A short query can therefore hit an unrelated pattern
//!   that happens to contain it; that containment rule is the contract
//! - Comparison is case-insensitive on both sides
//! - Ties between records containing the same query resolve to the first
//!   seeded record, which keeps results stable across runs
//! - No match is a normal outcome, not an error

use super::{CatalogStore, ConditionRecord};

/// Normalize raw symptom text: trim surrounding whitespace, lowercase.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

impl CatalogStore {
    /// Map free text to at most one condition record.
    ///
    /// Read-only; never fails for well-formed string input. `None` means the
    /// query is not contained in any stored pattern.
    pub fn match_symptoms(&self, input: &str) -> Option<ConditionRecord> {
        let query = normalize(input);
        let records = self.records.read().expect("catalog lock poisoned");
        records
            .iter()
            .find(|record| record.symptom_pattern.to_lowercase().contains(&query))
            .cloned()
    }
}
