//! # Namaste Core
//!
//! Core lookup logic for mapping diagnosis names to NAMASTE and ICD-11 codes.
//!
//! This crate contains pure lookup operations over a fixed vocabulary:
//! - Ranked autocomplete suggestions ([`SuggestionIndex`])
//! - Exact, normalised diagnosis resolution ([`DiagnosisResolver`])
//! - The resolve-before-confirm boundary ([`MapperService::confirm`])
//!
//! **No API concerns**: authentication, HTTP servers and simulated latency belong in
//! `api-shared` and `api-rest`.

pub mod config;
pub mod confirmation;
pub mod constants;
pub mod error;
pub mod normalise;
pub mod resolver;
pub mod suggestions;
pub mod validation;
pub mod vocabulary;

pub use config::CoreConfig;
pub use confirmation::{ConfirmationLog, ConfirmationReceipt, ConfirmationSink};
pub use error::{MapperError, MapperResult};
pub use normalise::normalise;
pub use resolver::{DiagnosisResolver, Resolution, ResolvedDiagnosis};
pub use suggestions::SuggestionIndex;
pub use vocabulary::{DiagnosisEntry, Vocabulary, SAMPLE_DIAGNOSES};

use std::sync::Arc;

/// Lookup and confirmation operations over one shared vocabulary.
///
/// Cloning is cheap; every clone shares the same vocabulary and confirmation sink.
#[derive(Clone)]
pub struct MapperService {
    vocabulary: Arc<Vocabulary>,
    suggestions: SuggestionIndex,
    resolver: DiagnosisResolver,
    sink: Arc<dyn ConfirmationSink>,
}

impl MapperService {
    /// Creates a new instance of MapperService.
    ///
    /// # Arguments
    /// * `vocabulary` - The diagnoses available for suggestion and resolution.
    /// * `sink` - Where confirmed diagnoses are recorded.
    pub fn new(vocabulary: Vocabulary, sink: Arc<dyn ConfirmationSink>) -> Self {
        let vocabulary = Arc::new(vocabulary);
        Self {
            suggestions: SuggestionIndex::new(Arc::clone(&vocabulary)),
            resolver: DiagnosisResolver::new(Arc::clone(&vocabulary)),
            vocabulary,
            sink,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// See [`SuggestionIndex::suggest`].
    pub fn suggest(&self, query: &str, max_suggestions: usize) -> Vec<String> {
        self.suggestions.suggest(query, max_suggestions)
    }

    /// See [`DiagnosisResolver::resolve`].
    pub fn resolve(&self, name: &str) -> Resolution {
        self.resolver.resolve(name)
    }

    /// Hand a resolved diagnosis to the confirmation sink.
    ///
    /// # Returns
    /// The sink's receipt.
    ///
    /// # Errors
    /// Returns `MapperError::Confirmation` if the sink rejected the entry.
    pub fn confirm_with_receipt(
        &self,
        diagnosis: &ResolvedDiagnosis,
    ) -> MapperResult<ConfirmationReceipt> {
        let receipt = self.sink.record(diagnosis.entry())?;
        tracing::info!(
            confirmation_id = %receipt.id,
            namaste_code = %receipt.entry.namaste_code,
            "diagnosis confirmed: {}",
            receipt.entry.name
        );
        Ok(receipt)
    }

    /// Hand a resolved diagnosis to the confirmation sink, reporting only success.
    ///
    /// Failures are logged rather than returned.
    pub fn confirm(&self, diagnosis: &ResolvedDiagnosis) -> bool {
        match self.confirm_with_receipt(diagnosis) {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("failed to confirm {}: {}", diagnosis.entry().name, e);
                false
            }
        }
    }
}

impl Default for MapperService {
    fn default() -> Self {
        Self::new(Vocabulary::builtin(), Arc::new(ConfirmationLog::new()))
    }
}

impl std::fmt::Debug for MapperService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperService")
            .field("diagnoses", &self.vocabulary.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingSink;

    impl ConfirmationSink for RejectingSink {
        fn record(&self, _entry: &DiagnosisEntry) -> MapperResult<ConfirmationReceipt> {
            Err(MapperError::Confirmation("storage unavailable".into()))
        }
    }

    #[test]
    fn suggest_then_resolve_then_confirm() {
        let log = Arc::new(ConfirmationLog::new());
        let service = MapperService::new(Vocabulary::builtin(), log.clone());

        let suggestions = service.suggest("jw", 8);
        assert_eq!(suggestions, vec!["Jwara"]);

        let resolved = service
            .resolve(&suggestions[0])
            .into_resolved()
            .expect("suggested name resolves");
        assert!(service.confirm(&resolved));

        let receipts = log.receipts();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].entry.namaste_code, "NAM-JW-001");
    }

    #[test]
    fn unresolved_names_cannot_reach_the_sink() {
        let log = Arc::new(ConfirmationLog::new());
        let service = MapperService::new(Vocabulary::builtin(), log.clone());

        assert!(service.resolve("unknown disease").into_resolved().is_none());
        assert!(log.is_empty());
    }

    #[test]
    fn sink_failure_reports_false() {
        let service = MapperService::new(Vocabulary::builtin(), Arc::new(RejectingSink));
        let resolved = service
            .resolve("fever")
            .into_resolved()
            .expect("fever resolves");

        assert!(!service.confirm(&resolved));
        assert!(matches!(
            service.confirm_with_receipt(&resolved),
            Err(MapperError::Confirmation(msg)) if msg == "storage unavailable"
        ));
    }

    #[test]
    fn clones_share_the_sink() {
        let log = Arc::new(ConfirmationLog::new());
        let service = MapperService::new(Vocabulary::builtin(), log.clone());
        let clone = service.clone();

        let resolved = clone.resolve("Asthma").into_resolved().expect("asthma");
        let receipt = clone.confirm_with_receipt(&resolved).expect("confirm");

        assert_eq!(log.receipts(), vec![receipt]);
        assert_eq!(service.vocabulary().len(), 15);
    }
}
