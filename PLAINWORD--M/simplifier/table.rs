use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SimplifierError;

/// Built-in vocabulary, applied in this order.
pub const BUILTIN_REPLACEMENTS: [(&str, &str); 20] = [
    ("utilize", "use"),
    ("implement", "use"),
    ("facilitate", "help"),
    ("commence", "start"),
    ("terminate", "end"),
    ("subsequently", "then"),
    ("nevertheless", "however"),
    ("approximately", "about"),
    ("sufficient", "enough"),
    ("demonstrate", "show"),
    ("obtain", "get"),
    ("regarding", "about"),
    ("numerous", "many"),
    ("additional", "more"),
    ("assist", "help"),
    ("require", "need"),
    ("purchase", "buy"),
    ("receive", "get"),
    ("comprehend", "understand"),
    ("inquire", "ask"),
];

/// One complex word and the literal text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplacementEntry {
    /// Lowercase word matched case-insensitively on word boundaries.
    pub complex: String,
    /// Replacement inserted verbatim.
    pub simple: String,
}

impl ReplacementEntry {
    /// Creates an entry without validating it.
    #[must_use]
    pub fn new(complex: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            complex: complex.into(),
            simple: simple.into(),
        }
    }
}

/// Ordered, duplicate-free set of replacement entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: IndexMap<String, ReplacementEntry>,
}

impl ReplacementTable {
    /// The 20-entry built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_REPLACEMENTS
            .iter()
            .map(|(complex, simple)| {
                (
                    (*complex).to_string(),
                    ReplacementEntry::new(*complex, *simple),
                )
            })
            .collect();
        Self { entries }
    }

    /// Builds a table from entries, rejecting invalid and duplicate words.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ReplacementEntry>,
    ) -> Result<Self, SimplifierError> {
        let mut table = Self::default();
        for entry in entries {
            let complex = normalize_word(&entry.complex)?;
            if table.entries.contains_key(&complex) {
                return Err(SimplifierError::DuplicateWord(complex));
            }
            table.entries.insert(
                complex.clone(),
                ReplacementEntry::new(complex, entry.simple),
            );
        }
        Ok(table)
    }

    /// Layers entries on top of this table. Known words keep their position
    /// and take the new replacement; new words are appended.
    pub fn extend(
        &mut self,
        entries: impl IntoIterator<Item = ReplacementEntry>,
    ) -> Result<(), SimplifierError> {
        for entry in entries {
            let complex = normalize_word(&entry.complex)?;
            self.entries.insert(
                complex.clone(),
                ReplacementEntry::new(complex, entry.simple),
            );
        }
        Ok(())
    }

    /// Looks up the replacement for a complex word (case-insensitive).
    #[must_use]
    pub fn get(&self, complex: &str) -> Option<&str> {
        self.entries
            .get(&complex.trim().to_ascii_lowercase())
            .map(|entry| entry.simple.as_str())
    }

    /// Entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = &ReplacementEntry> {
        self.entries.values()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose replacement is itself a complex word of this table.
    ///
    /// An empty result means running the simplifier twice changes nothing
    /// the first run did not.
    #[must_use]
    pub fn collisions(&self) -> Vec<&ReplacementEntry> {
        self.iter()
            .filter(|entry| {
                self.entries
                    .contains_key(&entry.simple.trim().to_ascii_lowercase())
            })
            .collect()
    }
}

fn normalize_word(raw: &str) -> Result<String, SimplifierError> {
    let word = raw.trim();
    if word.is_empty() {
        return Err(SimplifierError::EmptyWord);
    }
    if !word
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return Err(SimplifierError::InvalidWord(word.to_string()));
    }
    Ok(word.to_ascii_lowercase())
}
