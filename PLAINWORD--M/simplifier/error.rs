use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a replacement table or loading configuration.
///
/// Simplification itself never fails.
#[derive(Debug, Error)]
pub enum SimplifierError {
    /// A complex word was empty after trimming.
    #[error("replacement word is empty")]
    EmptyWord,
    /// A complex word contained characters outside `[A-Za-z0-9_]`.
    #[error("invalid replacement word `{0}`: only ASCII letters, digits and `_` are allowed")]
    InvalidWord(String),
    /// The same complex word was declared twice.
    #[error("duplicate replacement word `{0}`")]
    DuplicateWord(String),
    /// A word pattern failed to compile.
    #[error("compiling word pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// The configuration file could not be read.
    #[error("reading {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The configuration document is not valid TOML for this schema.
    #[error("parsing {origin}: {source}")]
    Config {
        /// File path or `inline config`.
        origin: String,
        /// Underlying parse failure.
        source: toml::de::Error,
    },
}
