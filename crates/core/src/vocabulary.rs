//! The fixed set of known diagnoses.
//!
//! A [`Vocabulary`] is built once at startup, either from the built-in table or from a YAML file,
//! and is read-only afterwards. Its insertion order is significant: it is the final tie-break when
//! ranking suggestions.
//!
//! YAML format:
//!
//! ```yaml
//! - name: Jwara
//!   namaste_code: NAM-JW-001
//!   icd11_tm2_code: 1A00.0Z
//!   icd11_biomed_code: ICD-BIO-FVR-001
//! ```

use crate::normalise::normalise;
use crate::validation::validate_vocabulary_text;
use crate::{MapperError, MapperResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One diagnosis and its three external codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosisEntry {
    /// Display name, as offered in suggestions.
    pub name: String,
    /// NAMASTE traditional-medicine code (primary).
    pub namaste_code: String,
    /// ICD-11 Traditional Medicine Module 2 code (secondary).
    pub icd11_tm2_code: String,
    /// ICD-11 biomedical code (tertiary).
    pub icd11_biomed_code: String,
}

impl DiagnosisEntry {
    pub fn new(
        name: impl Into<String>,
        namaste_code: impl Into<String>,
        icd11_tm2_code: impl Into<String>,
        icd11_biomed_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namaste_code: namaste_code.into(),
            icd11_tm2_code: icd11_tm2_code.into(),
            icd11_biomed_code: icd11_biomed_code.into(),
        }
    }

    /// Identity key of this entry within a vocabulary.
    pub fn key(&self) -> String {
        normalise(&self.name)
    }

    fn validate(&self) -> MapperResult<()> {
        validate_vocabulary_text("name", &self.name)?;
        validate_vocabulary_text("namaste_code", &self.namaste_code)?;
        validate_vocabulary_text("icd11_tm2_code", &self.icd11_tm2_code)?;
        validate_vocabulary_text("icd11_biomed_code", &self.icd11_biomed_code)
    }
}

/// (name, NAMASTE, ICD-11 TM2, ICD-11 biomedical)
const BUILTIN_DIAGNOSES: &[(&str, &str, &str, &str)] = &[
    ("Jwara", "NAM-JW-001", "1A00.0Z", "ICD-BIO-FVR-001"),
    ("Fever", "NAM-FV-002", "1A00.1Z", "ICD-BIO-FVR-002"),
    ("Diabetes Type 1", "NAM-DM1-003", "5A10.Z", "ICD-BIO-DM-003"),
    ("Diabetes Type 2", "NAM-DM2-004", "5A11.Z", "ICD-BIO-DM-004"),
    ("Asthma", "NAM-AST-005", "CA23.Z", "ICD-BIO-AST-005"),
    ("Migraine", "NAM-MIG-006", "8A80.Z", "ICD-BIO-MIG-006"),
    ("Pneumonia", "NAM-PNA-007", "CA40.Z", "ICD-BIO-PNA-007"),
    ("Bronchitis", "NAM-BRN-008", "CA20.Z", "ICD-BIO-BRN-008"),
    ("Gastritis", "NAM-GST-009", "DA42.Z", "ICD-BIO-GST-009"),
    ("Hypertension", "NAM-HTN-010", "BA00.Z", "ICD-BIO-HTN-010"),
    ("Arthritis", "NAM-ART-011", "FA20.Z", "ICD-BIO-ART-011"),
    ("COVID-19", "NAM-COV-012", "RA01.0", "ICD-BIO-COV-012"),
    ("Amavata", "NAM-AMV-013", "SP50.Z", "ICD-BIO-RA-013"),
    ("Kasa", "NAM-KS-014", "SP20.Z", "ICD-BIO-CGH-014"),
    ("Prameha", "NAM-PRM-015", "SP40.Z", "ICD-BIO-DM-015"),
];

/// Names offered as one-click examples by front ends.
pub const SAMPLE_DIAGNOSES: &[&str] = &["Jwara", "Fever", "Hypertension", "Asthma"];

/// Ordered, read-only set of diagnoses with unique normalised names.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    entries: Vec<DiagnosisEntry>,
    by_key: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from entries in ranking order.
    ///
    /// # Errors
    ///
    /// Returns a `MapperError` if:
    /// - any name or code is empty, padded with whitespace, overlong or contains control
    ///   characters,
    /// - two entries share the same normalised name.
    pub fn new(entries: Vec<DiagnosisEntry>) -> MapperResult<Self> {
        let mut by_key = HashMap::with_capacity(entries.len());

        for (position, entry) in entries.iter().enumerate() {
            entry.validate()?;
            if by_key.insert(entry.key(), position).is_some() {
                return Err(MapperError::DuplicateDiagnosis(entry.name.clone()));
            }
        }

        Ok(Self { entries, by_key })
    }

    /// The vocabulary compiled into the binary.
    pub fn builtin() -> Self {
        let entries = BUILTIN_DIAGNOSES
            .iter()
            .map(|(name, namaste, tm2, biomed)| DiagnosisEntry::new(*name, *namaste, *tm2, *biomed))
            .collect::<Vec<_>>();

        let by_key = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.key(), position))
            .collect();

        Self { entries, by_key }
    }

    /// Strictly parse a vocabulary from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `[3].namaste_code`)
    /// to the failing field when the YAML does not match the expected schema.
    ///
    /// # Errors
    ///
    /// Returns a `MapperError` if:
    /// - the YAML is not a sequence of diagnosis mappings,
    /// - any mapping has missing, mistyped or unknown keys,
    /// - the entries fail the checks performed by [`Vocabulary::new`].
    pub fn from_yaml_str(yaml_text: &str) -> MapperResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let entries = match serde_path_to_error::deserialize::<_, Vec<DiagnosisEntry>>(deserializer)
        {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(MapperError::VocabularySchema(format!(
                    "vocabulary schema mismatch at {path}: {source}"
                )));
            }
        };

        Self::new(entries)
    }

    /// Read and parse a YAML vocabulary file.
    ///
    /// # Errors
    ///
    /// Returns `MapperError::VocabularyRead` if the file cannot be read, or any error from
    /// [`Vocabulary::from_yaml_str`].
    pub fn load(path: &Path) -> MapperResult<Self> {
        let text = std::fs::read_to_string(path).map_err(MapperError::VocabularyRead)?;
        let vocabulary = Self::from_yaml_str(&text)?;
        tracing::info!(
            "loaded {} diagnoses from {}",
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn entries(&self) -> &[DiagnosisEntry] {
        &self.entries
    }

    /// Display names in vocabulary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Exact lookup by an already-normalised key.
    pub(crate) fn get_normalised(&self, key: &str) -> Option<&DiagnosisEntry> {
        self.by_key.get(key).map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_vocabulary_passes_validation() {
        let builtin = Vocabulary::builtin();
        let rebuilt = Vocabulary::new(builtin.entries().to_vec()).expect("builtin is valid");
        assert_eq!(rebuilt.len(), 15);
        assert_eq!(builtin.names().next(), Some("Jwara"));
    }

    #[test]
    fn samples_are_in_builtin_vocabulary() {
        let vocabulary = Vocabulary::builtin();
        for sample in SAMPLE_DIAGNOSES {
            assert!(
                vocabulary.get_normalised(&normalise(sample)).is_some(),
                "{sample} missing"
            );
        }
    }

    #[test]
    fn rejects_duplicate_normalised_names() {
        let err = Vocabulary::new(vec![
            DiagnosisEntry::new("Fever", "A", "B", "C"),
            DiagnosisEntry::new("FEVER", "D", "E", "F"),
        ])
        .expect_err("should reject duplicate");
        assert!(matches!(err, MapperError::DuplicateDiagnosis(name) if name == "FEVER"));
    }

    #[test]
    fn rejects_padded_names() {
        let err = Vocabulary::new(vec![
            DiagnosisEntry::new("   Ab", "A", "B", "C"),
            DiagnosisEntry::new("Abc", "D", "E", "F"),
        ])
        .expect_err("should reject padded name");
        assert!(
            matches!(err, MapperError::InvalidInput(msg) if msg == "name must not have leading or trailing whitespace")
        );
    }

    #[test]
    fn padded_yaml_names_are_rejected() {
        let yaml = "- name: \"Fever \"\n  namaste_code: NAM-FV-002\n  icd11_tm2_code: 1A00.1Z\n  icd11_biomed_code: ICD-BIO-FVR-002\n";
        let err = Vocabulary::from_yaml_str(yaml).expect_err("should reject padded name");
        assert!(matches!(err, MapperError::InvalidInput(_)));
    }

    #[test]
    fn rejects_empty_codes() {
        let err = Vocabulary::new(vec![DiagnosisEntry::new("Fever", "NAM-FV-002", "", "C")])
            .expect_err("should reject empty code");
        assert!(
            matches!(err, MapperError::InvalidInput(msg) if msg == "icd11_tm2_code cannot be empty")
        );
    }

    #[test]
    fn parses_yaml_in_order() {
        let yaml = r#"- name: Kasa
  namaste_code: NAM-KS-014
  icd11_tm2_code: SP20.Z
  icd11_biomed_code: ICD-BIO-CGH-014
- name: Jwara
  namaste_code: NAM-JW-001
  icd11_tm2_code: 1A00.0Z
  icd11_biomed_code: ICD-BIO-FVR-001
"#;

        let vocabulary = Vocabulary::from_yaml_str(yaml).expect("parse yaml");
        assert_eq!(vocabulary.names().collect::<Vec<_>>(), vec!["Kasa", "Jwara"]);
        assert_eq!(
            vocabulary.get_normalised("jwara").map(|e| e.namaste_code.as_str()),
            Some("NAM-JW-001")
        );
    }

    #[test]
    fn yaml_schema_errors_name_the_failing_path() {
        let yaml = r#"- name: Kasa
  namaste_code: NAM-KS-014
  icd11_tm2_code: SP20.Z
  icd11_biomed_code: ICD-BIO-CGH-014
- name: Jwara
  namaste_code: NAM-JW-001
  icd11_tm2_code: 1A00.0Z
  icd11_biomed_code: ICD-BIO-FVR-001
  synonyms: [fever]
"#;

        let err = Vocabulary::from_yaml_str(yaml).expect_err("should reject unknown key");
        match err {
            MapperError::VocabularySchema(msg) => {
                assert!(msg.contains("[1]"), "{msg}");
                assert!(msg.contains("synonyms"), "{msg}");
            }
            other => panic!("expected VocabularySchema error, got {other:?}"),
        }
    }

    #[test]
    fn yaml_that_is_not_a_sequence_is_rejected() {
        let err = Vocabulary::from_yaml_str("name: Jwara\n").expect_err("should reject mapping");
        assert!(matches!(err, MapperError::VocabularySchema(_)));
    }

    #[test]
    fn loads_vocabulary_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            "- name: Amavata\n  namaste_code: NAM-AMV-013\n  icd11_tm2_code: SP50.Z\n  icd11_biomed_code: ICD-BIO-RA-013"
        )
        .expect("write yaml");

        let vocabulary = Vocabulary::load(file.path()).expect("load vocabulary");
        assert_eq!(vocabulary.len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = Vocabulary::load(&dir.path().join("missing.yaml")).expect_err("should fail");
        assert!(matches!(err, MapperError::VocabularyRead(_)));
    }
}
