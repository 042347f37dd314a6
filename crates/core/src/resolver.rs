//! Exact diagnosis lookup.
//!
//! Unlike suggestions, resolution never matches partially: a confirmation must bind to exactly one
//! vocabulary entry.

use crate::normalise::normalise;
use crate::{DiagnosisEntry, Vocabulary};
use serde::Serialize;
use std::sync::Arc;

/// A diagnosis that was found in the vocabulary.
///
/// Only [`DiagnosisResolver::resolve`] creates values of this type, which is what makes
/// confirmation of an unresolved name impossible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedDiagnosis(DiagnosisEntry);

impl ResolvedDiagnosis {
    pub fn entry(&self) -> &DiagnosisEntry {
        &self.0
    }

    pub fn into_entry(self) -> DiagnosisEntry {
        self.0
    }
}

/// Outcome of a lookup. Absence is an expected result, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedDiagnosis),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn entry(&self) -> Option<&DiagnosisEntry> {
        match self {
            Resolution::Found(resolved) => Some(resolved.entry()),
            Resolution::NotFound => None,
        }
    }

    pub fn into_resolved(self) -> Option<ResolvedDiagnosis> {
        match self {
            Resolution::Found(resolved) => Some(resolved),
            Resolution::NotFound => None,
        }
    }
}

/// Case- and whitespace-insensitive exact lookup over a shared [`Vocabulary`].
#[derive(Clone, Debug)]
pub struct DiagnosisResolver {
    vocabulary: Arc<Vocabulary>,
}

impl DiagnosisResolver {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        match self.vocabulary.get_normalised(&normalise(name)) {
            Some(entry) => Resolution::Found(ResolvedDiagnosis(entry.clone())),
            None => Resolution::NotFound,
        }
    }
}
