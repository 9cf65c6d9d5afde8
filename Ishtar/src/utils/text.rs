//! Small string helpers shared by the rule tables and the decoder

/// Case-insensitive substring test.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Ember of Torches", "ember"));
        assert!(!contains_ignore_case("Echo of Undermining", "ember"));
    }
}
