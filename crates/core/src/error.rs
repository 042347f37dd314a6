/// Errors raised by the diagnosis mapper core.
///
/// "No match" is never represented here: an unmatched query yields an empty suggestion list and
/// an unmatched name yields [`crate::Resolution::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate diagnosis in vocabulary: {0}")]
    DuplicateDiagnosis(String),
    #[error("failed to read vocabulary file: {0}")]
    VocabularyRead(std::io::Error),
    #[error("{0}")]
    VocabularySchema(String),
    #[error("failed to record confirmation: {0}")]
    Confirmation(String),
}

pub type MapperResult<T> = std::result::Result<T, MapperError>;
