#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Plainword simplifier: rewrites prose by normalizing `;`/`:` to `.` and
//! swapping a fixed vocabulary of complex words for simpler ones.

/// Error taxonomy for table construction and configuration.
#[path = "../error.rs"]
pub mod error;

/// Sentence splitting and punctuation helpers.
#[path = "../helper.rs"]
pub mod helper;

/// Replacement table definitions and validation.
#[path = "../table.rs"]
pub mod table;

/// Compiled simplification pipeline.
#[path = "../simplify.rs"]
pub mod simplify;

/// TOML configuration loading.
#[path = "../config.rs"]
pub mod config;

/// Telemetry helpers.
#[path = "../telemetry.rs"]
pub mod telemetry;

use once_cell::sync::Lazy;

pub use config::{PlainwordConfig, TableMode, TableSection, TelemetrySection};
pub use error::SimplifierError;
pub use helper::{is_blank, normalize_punctuation, split_sentences, trim_blank};
pub use simplify::{RuleHits, Simplifier, SimplifyReport};
pub use table::{ReplacementEntry, ReplacementTable, BUILTIN_REPLACEMENTS};
pub use telemetry::{SimplifierTelemetry, SimplifierTelemetryBuilder};

static BUILTIN: Lazy<Simplifier> = Lazy::new(Simplifier::builtin);

/// Returns the process-wide simplifier compiled from the built-in table.
#[must_use]
pub fn builtin_simplifier() -> &'static Simplifier {
    &BUILTIN
}

/// Simplifies `text` with the built-in replacement table.
///
/// Total over all strings: blank input yields an empty string and nothing
/// else can fail.
#[must_use]
pub fn simplify_text(text: &str) -> String {
    BUILTIN.simplify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_simplifier_is_reused() {
        assert!(std::ptr::eq(builtin_simplifier(), builtin_simplifier()));
        assert_eq!(builtin_simplifier().table().len(), 20);
    }

    #[test]
    fn simplify_text_handles_blank_input() {
        assert_eq!(simplify_text(""), "");
        assert_eq!(simplify_text("   "), "");
        assert_eq!(simplify_text("\n\t "), "");
    }

    #[test]
    fn shared_simplifier_works_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| simplify_text("We obtain numerous results")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "We get many results");
        }
    }
}
