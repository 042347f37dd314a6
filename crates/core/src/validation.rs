//! Input validation utilities.
//!
//! This module contains functions for validating vocabulary content before it is accepted into a
//! [`crate::Vocabulary`]. Queries are never validated here: any string is a valid query.

use crate::constants::MAX_VOCABULARY_TEXT_LEN;
use crate::{MapperError, MapperResult};

/// Validates a diagnosis name or code taken from a vocabulary source.
///
/// Guardrails:
/// - Rejects empty or whitespace-only strings
/// - Rejects leading or trailing whitespace, so stored text is already in display form
/// - Bounds the length to avoid pathological inputs
/// - Rejects control characters, which cannot be typed into a search box
///
/// # Arguments
///
/// * `field` - Name of the field being validated, used in the error message.
/// * `value` - The text to validate.
///
/// # Errors
///
/// Returns a `MapperError::InvalidInput` if the text is invalid.
pub fn validate_vocabulary_text(field: &str, value: &str) -> MapperResult<()> {
    if value.trim().is_empty() {
        return Err(MapperError::InvalidInput(format!("{field} cannot be empty")));
    }

    if value != value.trim() {
        return Err(MapperError::InvalidInput(format!(
            "{field} must not have leading or trailing whitespace"
        )));
    }

    if value.chars().count() > MAX_VOCABULARY_TEXT_LEN {
        return Err(MapperError::InvalidInput(format!(
            "{field} exceeds maximum length of {} characters",
            MAX_VOCABULARY_TEXT_LEN
        )));
    }

    if value.chars().any(char::is_control) {
        return Err(MapperError::InvalidInput(format!(
            "{field} must not contain control characters"
        )));
    }

    Ok(())
}
