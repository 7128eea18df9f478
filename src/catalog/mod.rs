//! Condition catalog subsystem.
//!
//! # Data Flow
//! ```text
//! seed rows (startup)
//!     → CatalogStore (first-write-wins, idempotent re-seed)
//!     → matcher.rs (read-only substring matching)
//! ```
//!
//! # Design Decisions
//! - The store is effectively immutable after startup; the interior lock
//!   exists only so re-seeding stays idempotent
//! - Records keep insertion order, which the matcher's tie-break relies on

pub mod matcher;

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// A single symptom-pattern-to-diagnosis mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    /// Comma-delimited symptom tokens, stored verbatim.
    pub symptom_pattern: String,

    /// Human-readable condition name.
    pub condition: String,

    /// Suggested medicines for the condition.
    pub medicines: String,
}

/// Demo seed rows loaded at startup.
pub const DEMO_CATALOG: [(&str, &str, &str); 10] = [
    ("headache,cold", "Common Cold", "Paracetamol, Vitamin C"),
    ("fever", "Viral Fever", "Ibuprofen, ORS solution"),
    ("stomach pain", "Gastritis", "Antacid syrup, Omeprazole"),
    ("cough", "Bronchitis", "Cough syrup, Honey ginger tea"),
    ("sneezing,runny nose", "Allergic Rhinitis", "Cetirizine, Loratadine"),
    ("headache,nausea", "Migraine", "Sumatriptan, Naproxen"),
    (
        "thirst,frequent urination",
        "Diabetes (possible)",
        "Metformin (doctor prescribed only)",
    ),
    (
        "fatigue,weakness",
        "Anemia (possible)",
        "Iron supplements, Folic acid",
    ),
    (
        "shortness of breath,chest pain",
        "Angina (possible)",
        "Aspirin (doctor prescribed only)",
    ),
    ("sore throat", "Pharyngitis", "Warm saline gargle, Lozenges"),
];

/// Immutable-after-seed collection of condition records.
#[derive(Default)]
pub struct CatalogStore {
    records: RwLock<Vec<ConditionRecord>>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store seeded with the demo catalog.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.seed(DEMO_CATALOG.iter().map(|(pattern, condition, medicines)| {
            ConditionRecord {
                symptom_pattern: (*pattern).to_string(),
                condition: (*condition).to_string(),
                medicines: (*medicines).to_string(),
            }
        }));
        store
    }

    /// Insert rows, skipping any whose pattern is already present.
    ///
    /// First-write-wins: re-seeding with the same rows is a no-op. Nothing
    /// prevents two *different* patterns from sharing overlapping substrings.
    ///
    /// Returns the number of rows actually inserted.
    pub fn seed<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = ConditionRecord>,
    {
        let mut records = self.records.write().expect("catalog lock poisoned");
        let mut inserted = 0;
        for row in rows {
            if records
                .iter()
                .any(|r| r.symptom_pattern == row.symptom_pattern)
            {
                continue;
            }
            records.push(row);
            inserted += 1;
        }
        inserted
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().expect("catalog lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
