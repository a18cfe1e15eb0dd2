/// True if any value appears more than once.
pub fn has_duplicates(values: &[usize]) -> bool {
    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            return true;
        }
    }
    false
}

/// Parses a player-facing 1-based choice token. Returns the 1-based
/// number; conversion to internal zero-based indexing happens at the
/// call site once the range is known.
pub fn parse_choice(token: &str) -> Option<usize> {
    token.trim().parse::<usize>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_duplicates() {
        assert!(has_duplicates(&[1, 2, 1]));
        assert!(!has_duplicates(&[1, 2, 3]));
        assert!(!has_duplicates(&[]));
    }

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_choice(" 3 "), Some(3));
        assert_eq!(parse_choice("0"), Some(0));
        assert_eq!(parse_choice("two"), None);
        assert_eq!(parse_choice("-1"), None);
    }
}
