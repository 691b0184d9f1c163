//! Normalization of free-text answers.

/// Lowercases the answer and drops ASCII punctuation and spaces, so that
/// "Вчерашний день!" and "вчерашнийдень" compare equal.
#[must_use]
pub fn normalize(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_case_spaces_and_punctuation() {
        assert_eq!(normalize("Вчерашний  день!"), "вчерашнийдень");
        assert_eq!(normalize(" ВРЕМЯ... "), "время");
    }

    #[test]
    fn test_normalize_keeps_non_ascii_punctuation() {
        assert_eq!(normalize("«Время»"), "«время»");
    }
}
