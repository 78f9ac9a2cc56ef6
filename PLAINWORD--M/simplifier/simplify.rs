use regex::{NoExpand, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    error::SimplifierError,
    helper::{normalize_punctuation, punctuation_rewrites, split_sentences, trim_blank},
    table::{ReplacementEntry, ReplacementTable},
};

/// How often one rule fired during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHits {
    /// Complex word of the rule.
    pub complex: String,
    /// Replacement inserted.
    pub simple: String,
    /// Number of occurrences replaced.
    pub count: usize,
}

/// Output of a run along with what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyReport {
    /// Simplified text, identical to [`Simplifier::simplify`].
    pub output: String,
    /// Sentence elements kept after splitting (delimiter runs included).
    pub sentences: usize,
    /// Number of `;`/`:` rewritten as `.`.
    pub punctuation_rewrites: usize,
    /// Rules that fired at least once, in table order.
    pub replacements: Vec<RuleHits>,
}

impl SimplifyReport {
    /// Total number of word replacements.
    #[must_use]
    pub fn total_replacements(&self) -> usize {
        self.replacements.iter().map(|hits| hits.count).sum()
    }
}

#[derive(Debug, Clone)]
struct WordRule {
    entry: ReplacementEntry,
    pattern: Regex,
}

impl WordRule {
    fn compile(entry: &ReplacementEntry) -> Result<Self, SimplifierError> {
        // ASCII word boundaries and ASCII case folding only.
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&entry.complex)))
            .case_insensitive(true)
            .unicode(false)
            .build()?;
        Ok(Self {
            entry: entry.clone(),
            pattern,
        })
    }
}

/// Compiled simplification pipeline over a replacement table.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Simplifier {
    table: ReplacementTable,
    rules: Vec<WordRule>,
}

impl Simplifier {
    /// Compiles one word-boundary rule per table entry, keeping table order.
    pub fn from_table(table: ReplacementTable) -> Result<Self, SimplifierError> {
        let rules = table
            .iter()
            .map(WordRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rules = rules.len(), "compiled replacement rules");
        Ok(Self { table, rules })
    }

    /// Simplifier over the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_table(ReplacementTable::builtin())
            .expect("built-in replacement words are plain ASCII")
    }

    /// Table the rules were compiled from.
    #[must_use]
    pub const fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Simplifies `text`.
    #[must_use]
    pub fn simplify(&self, text: &str) -> String {
        self.run(text, None)
    }

    /// Simplifies `text` and reports what changed.
    #[must_use]
    pub fn simplify_with_report(&self, text: &str) -> SimplifyReport {
        let mut tally = Tally {
            sentences: 0,
            punctuation_rewrites: 0,
            hits: vec![0; self.rules.len()],
        };
        let output = self.run(text, Some(&mut tally));
        let replacements = self
            .rules
            .iter()
            .zip(tally.hits)
            .filter(|(_, count)| *count > 0)
            .map(|(rule, count)| RuleHits {
                complex: rule.entry.complex.clone(),
                simple: rule.entry.simple.clone(),
                count,
            })
            .collect();
        SimplifyReport {
            output,
            sentences: tally.sentences,
            punctuation_rewrites: tally.punctuation_rewrites,
            replacements,
        }
    }

    fn run(&self, text: &str, mut tally: Option<&mut Tally>) -> String {
        if trim_blank(text).is_empty() {
            return String::new();
        }
        let sentences = split_sentences(text);
        let mut rewritten = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            if let Some(tally) = tally.as_deref_mut() {
                tally.punctuation_rewrites += punctuation_rewrites(sentence);
            }
            let mut current = normalize_punctuation(sentence);
            for (idx, rule) in self.rules.iter().enumerate() {
                let count = rule.pattern.find_iter(&current).count();
                if count == 0 {
                    continue;
                }
                current = rule
                    .pattern
                    .replace_all(&current, NoExpand(&rule.entry.simple))
                    .into_owned();
                if let Some(tally) = tally.as_deref_mut() {
                    tally.hits[idx] += count;
                }
            }
            rewritten.push(current);
        }
        if let Some(tally) = tally {
            tally.sentences = sentences.len();
        }
        trim_blank(&rewritten.join(" ")).to_string()
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::builtin()
    }
}

struct Tally {
    sentences: usize,
    punctuation_rewrites: usize,
    hits: Vec<usize>,
}
