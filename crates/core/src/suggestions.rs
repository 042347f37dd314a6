//! Autocomplete over the vocabulary.
//!
//! Matching is by substring of the normalised name. Ranking:
//! 1. names that start with the query come before names that only contain it,
//! 2. shorter names (by normalised length) come before longer ones,
//! 3. otherwise vocabulary order is kept (the sort is stable).

use crate::constants::MIN_QUERY_CHARS;
use crate::normalise::normalise;
use crate::Vocabulary;
use std::sync::Arc;

/// Ranked substring search over a shared [`Vocabulary`].
#[derive(Clone, Debug)]
pub struct SuggestionIndex {
    vocabulary: Arc<Vocabulary>,
    keys: Arc<[String]>,
}

impl SuggestionIndex {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        let keys = vocabulary
            .entries()
            .iter()
            .map(|entry| entry.key())
            .collect::<Vec<_>>()
            .into();

        Self { vocabulary, keys }
    }

    /// Suggest up to `max_suggestions` diagnosis names for a partial query.
    ///
    /// Queries shorter than two characters after normalisation return nothing, as do queries
    /// that match no name. This never fails.
    pub fn suggest(&self, query: &str, max_suggestions: usize) -> Vec<String> {
        let needle = normalise(query);
        if needle.chars().count() < MIN_QUERY_CHARS || max_suggestions == 0 {
            return Vec::new();
        }

        let mut matches = self
            .vocabulary
            .entries()
            .iter()
            .zip(self.keys.iter())
            .filter(|(_, key)| key.contains(&needle))
            .map(|(entry, key)| (!key.starts_with(&needle), key.chars().count(), entry))
            .collect::<Vec<_>>();

        // `false` sorts first, so prefix matches lead.
        matches.sort_by_key(|(not_prefix, len, _)| (*not_prefix, *len));

        matches
            .into_iter()
            .take(max_suggestions)
            .map(|(_, _, entry)| entry.name.clone())
            .collect()
    }
}
