//! Constants used throughout the mapper core.
//!
//! Defaults for configuration values live here so the binaries and tests agree on them.

/// Shortest normalised query, in characters, that produces suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

/// Number of suggestions returned when the caller does not ask for a specific amount.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 8;

/// Upper bound applied to caller-supplied suggestion counts.
pub const DEFAULT_MAX_SUGGESTIONS_LIMIT: usize = 50;

/// Longest diagnosis name or code accepted into a vocabulary.
pub const MAX_VOCABULARY_TEXT_LEN: usize = 200;

/// Environment variable naming an optional YAML vocabulary file.
pub const VOCABULARY_FILE_ENV: &str = "NAMASTE_VOCABULARY_FILE";

/// Environment variable overriding [`DEFAULT_MAX_SUGGESTIONS`].
pub const MAX_SUGGESTIONS_ENV: &str = "NAMASTE_MAX_SUGGESTIONS";

/// Environment variable overriding [`DEFAULT_MAX_SUGGESTIONS_LIMIT`].
pub const MAX_SUGGESTIONS_LIMIT_ENV: &str = "NAMASTE_MAX_SUGGESTIONS_LIMIT";

/// Receipts kept by the in-memory confirmation log before the oldest are dropped.
pub const DEFAULT_CONFIRMATION_LOG_CAPACITY: usize = 1000;

/// Environment variable overriding [`DEFAULT_CONFIRMATION_LOG_CAPACITY`].
pub const CONFIRMATION_LOG_CAPACITY_ENV: &str = "NAMASTE_CONFIRMATION_LOG_CAPACITY";
