//! Canonical comparison form for diagnosis names and queries.

/// Trim surrounding whitespace and lowercase.
///
/// Both the suggestion index and the resolver compare against this form, so `"  Fever "`,
/// `"FEVER"` and `"fever"` are interchangeable.
pub fn normalise(input: &str) -> String {
    input.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalise("  Fever  "), "fever");
        assert_eq!(normalise("COVID-19"), "covid-19");
        assert_eq!(normalise("\tDiabetes Type 1\n"), "diabetes type 1");
    }

    #[test]
    fn keeps_inner_whitespace() {
        assert_eq!(normalise(" Diabetes  Type 2 "), "diabetes  type 2");
    }

    #[test]
    fn blank_input_normalises_to_empty() {
        assert_eq!(normalise(""), "");
        assert_eq!(normalise("   "), "");
    }
}
