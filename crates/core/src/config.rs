//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the mapper. Request
//! handling never reads process-wide environment variables. The parsing helpers take the raw
//! `Option<String>` of an environment variable so they can be exercised without touching the
//! environment.

use crate::constants::{
    CONFIRMATION_LOG_CAPACITY_ENV, DEFAULT_CONFIRMATION_LOG_CAPACITY, DEFAULT_MAX_SUGGESTIONS,
    DEFAULT_MAX_SUGGESTIONS_LIMIT, MAX_SUGGESTIONS_ENV, MAX_SUGGESTIONS_LIMIT_ENV,
    VOCABULARY_FILE_ENV,
};
use crate::{ConfirmationLog, MapperError, MapperResult, Vocabulary};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    vocabulary_file: Option<PathBuf>,
    default_max_suggestions: usize,
    max_suggestions_limit: usize,
    confirmation_log_capacity: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if the limit is zero or the default exceeds the limit.
    pub fn new(
        vocabulary_file: Option<PathBuf>,
        default_max_suggestions: usize,
        max_suggestions_limit: usize,
    ) -> MapperResult<Self> {
        if max_suggestions_limit == 0 {
            return Err(MapperError::InvalidInput(
                "max_suggestions_limit must be at least 1".into(),
            ));
        }

        if default_max_suggestions > max_suggestions_limit {
            return Err(MapperError::InvalidInput(format!(
                "default max_suggestions ({default_max_suggestions}) exceeds limit ({max_suggestions_limit})"
            )));
        }

        Ok(Self {
            vocabulary_file,
            default_max_suggestions,
            max_suggestions_limit,
            confirmation_log_capacity: DEFAULT_CONFIRMATION_LOG_CAPACITY,
        })
    }

    /// Set how many receipts the in-memory confirmation log keeps.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if the capacity is zero.
    pub fn with_confirmation_log_capacity(mut self, capacity: usize) -> MapperResult<Self> {
        if capacity == 0 {
            return Err(MapperError::InvalidInput(
                "confirmation_log_capacity must be at least 1".into(),
            ));
        }

        self.confirmation_log_capacity = capacity;
        Ok(self)
    }

    /// Resolve the configuration from environment-style values.
    ///
    /// `lookup` returns the raw value of a variable, or `None` if it is unset. Binaries pass
    /// `|name| std::env::var(name).ok()`.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::InvalidInput` if any value is malformed or the values are inconsistent.
    pub fn from_env_lookup(lookup: impl Fn(&str) -> Option<String>) -> MapperResult<Self> {
        let default_max = suggestion_count_from_env_value(
            MAX_SUGGESTIONS_ENV,
            lookup(MAX_SUGGESTIONS_ENV),
            DEFAULT_MAX_SUGGESTIONS,
        )?;
        let max_limit = suggestion_count_from_env_value(
            MAX_SUGGESTIONS_LIMIT_ENV,
            lookup(MAX_SUGGESTIONS_LIMIT_ENV),
            DEFAULT_MAX_SUGGESTIONS_LIMIT,
        )?;
        let log_capacity = suggestion_count_from_env_value(
            CONFIRMATION_LOG_CAPACITY_ENV,
            lookup(CONFIRMATION_LOG_CAPACITY_ENV),
            DEFAULT_CONFIRMATION_LOG_CAPACITY,
        )?;

        Self::new(
            vocabulary_file_from_env_value(lookup(VOCABULARY_FILE_ENV)),
            default_max,
            max_limit,
        )?
        .with_confirmation_log_capacity(log_capacity)
    }

    pub fn vocabulary_file(&self) -> Option<&Path> {
        self.vocabulary_file.as_deref()
    }

    pub fn default_max_suggestions(&self) -> usize {
        self.default_max_suggestions
    }

    pub fn max_suggestions_limit(&self) -> usize {
        self.max_suggestions_limit
    }

    pub fn confirmation_log_capacity(&self) -> usize {
        self.confirmation_log_capacity
    }

    /// An empty confirmation log sized from this configuration.
    pub fn confirmation_log(&self) -> ConfirmationLog {
        ConfirmationLog::with_capacity(self.confirmation_log_capacity)
    }

    /// Apply the configured default and limit to a caller-supplied suggestion count.
    pub fn effective_max_suggestions(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_max_suggestions)
            .min(self.max_suggestions_limit)
    }

    /// Load the configured vocabulary, falling back to the built-in table.
    ///
    /// # Errors
    ///
    /// Returns a `MapperError` if a vocabulary file is configured but cannot be read or parsed.
    pub fn load_vocabulary(&self) -> MapperResult<Vocabulary> {
        match &self.vocabulary_file {
            Some(path) => Vocabulary::load(path),
            None => {
                tracing::info!("using built-in vocabulary");
                Ok(Vocabulary::builtin())
            }
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            vocabulary_file: None,
            default_max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_suggestions_limit: DEFAULT_MAX_SUGGESTIONS_LIMIT,
            confirmation_log_capacity: DEFAULT_CONFIRMATION_LOG_CAPACITY,
        }
    }
}

/// Parse an optional vocabulary file path.
///
/// `None` or empty/whitespace means "use the built-in vocabulary".
pub fn vocabulary_file_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse a suggestion count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
///
/// # Errors
///
/// Returns `MapperError::InvalidInput` if the value is not a non-negative integer.
pub fn suggestion_count_from_env_value(
    name: &str,
    value: Option<String>,
    default: usize,
) -> MapperResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(default),
        Some(v) => v.parse::<usize>().map_err(|_| {
            MapperError::InvalidInput(format!("{name} must be a non-negative integer, got {v:?}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_builtin_vocabulary() {
        let cfg = CoreConfig::default();
        assert!(cfg.vocabulary_file().is_none());
        assert_eq!(cfg.default_max_suggestions(), DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(cfg.load_vocabulary().expect("builtin").len(), 15);
    }

    #[test]
    fn rejects_default_above_limit() {
        let err = CoreConfig::new(None, 10, 5).expect_err("should reject");
        assert!(matches!(err, MapperError::InvalidInput(msg) if msg.contains("exceeds limit")));
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(CoreConfig::new(None, 0, 0).is_err());
    }

    #[test]
    fn effective_max_applies_default_and_limit() {
        let cfg = CoreConfig::new(None, 8, 20).expect("valid config");
        assert_eq!(cfg.effective_max_suggestions(None), 8);
        assert_eq!(cfg.effective_max_suggestions(Some(3)), 3);
        assert_eq!(cfg.effective_max_suggestions(Some(0)), 0);
        assert_eq!(cfg.effective_max_suggestions(Some(500)), 20);
    }

    #[test]
    fn parses_suggestion_counts() {
        assert_eq!(
            suggestion_count_from_env_value("N", None, 8).expect("default"),
            8
        );
        assert_eq!(
            suggestion_count_from_env_value("N", Some("  ".into()), 8).expect("blank"),
            8
        );
        assert_eq!(
            suggestion_count_from_env_value("N", Some(" 12 ".into()), 8).expect("value"),
            12
        );

        let err = suggestion_count_from_env_value("NAMASTE_MAX_SUGGESTIONS", Some("-1".into()), 8)
            .expect_err("should reject negative");
        assert!(
            matches!(err, MapperError::InvalidInput(msg) if msg.contains("NAMASTE_MAX_SUGGESTIONS"))
        );
    }

    #[test]
    fn confirmation_log_capacity_is_configurable() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.confirmation_log_capacity(), DEFAULT_CONFIRMATION_LOG_CAPACITY);

        let cfg = cfg.with_confirmation_log_capacity(2).expect("valid capacity");
        assert_eq!(cfg.confirmation_log().capacity(), 2);

        let err = CoreConfig::default()
            .with_confirmation_log_capacity(0)
            .expect_err("should reject zero");
        assert!(
            matches!(err, MapperError::InvalidInput(msg) if msg.contains("confirmation_log_capacity"))
        );
    }

    #[test]
    fn from_env_lookup_uses_defaults_when_unset() {
        let cfg = CoreConfig::from_env_lookup(|_| None).expect("defaults");
        assert!(cfg.vocabulary_file().is_none());
        assert_eq!(cfg.default_max_suggestions(), DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(cfg.max_suggestions_limit(), DEFAULT_MAX_SUGGESTIONS_LIMIT);
        assert_eq!(cfg.confirmation_log_capacity(), DEFAULT_CONFIRMATION_LOG_CAPACITY);
    }

    #[test]
    fn from_env_lookup_reads_every_variable() {
        let cfg = CoreConfig::from_env_lookup(|name| match name {
            VOCABULARY_FILE_ENV => Some("vocab.yaml".into()),
            MAX_SUGGESTIONS_ENV => Some("3".into()),
            MAX_SUGGESTIONS_LIMIT_ENV => Some("10".into()),
            CONFIRMATION_LOG_CAPACITY_ENV => Some("25".into()),
            _ => None,
        })
        .expect("valid values");

        assert_eq!(cfg.vocabulary_file(), Some(Path::new("vocab.yaml")));
        assert_eq!(cfg.effective_max_suggestions(None), 3);
        assert_eq!(cfg.effective_max_suggestions(Some(99)), 10);
        assert_eq!(cfg.confirmation_log_capacity(), 25);
    }

    #[test]
    fn from_env_lookup_rejects_malformed_values() {
        let err = CoreConfig::from_env_lookup(|name| {
            (name == CONFIRMATION_LOG_CAPACITY_ENV).then(|| "lots".to_string())
        })
        .expect_err("should reject");
        assert!(
            matches!(err, MapperError::InvalidInput(msg) if msg.contains(CONFIRMATION_LOG_CAPACITY_ENV))
        );

        let err = CoreConfig::from_env_lookup(|name| {
            (name == MAX_SUGGESTIONS_ENV).then(|| "100".to_string())
        })
        .expect_err("default above limit");
        assert!(matches!(err, MapperError::InvalidInput(msg) if msg.contains("exceeds limit")));
    }

    #[test]
    fn parses_vocabulary_file() {
        assert_eq!(vocabulary_file_from_env_value(None), None);
        assert_eq!(vocabulary_file_from_env_value(Some(" ".into())), None);
        assert_eq!(
            vocabulary_file_from_env_value(Some("vocab.yaml".into())),
            Some(PathBuf::from("vocab.yaml"))
        );
    }

    #[test]
    fn configured_missing_file_fails_to_load() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let cfg = CoreConfig::new(Some(dir.path().join("nope.yaml")), 8, 50).expect("valid");
        assert!(matches!(
            cfg.load_vocabulary(),
            Err(MapperError::VocabularyRead(_))
        ));
    }
}
