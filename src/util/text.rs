//! Bounded text helpers

use std::collections::TryReserveError;

/// Longest prefix of `s` holding at most `max_chars` characters.
///
/// Never splits a character, so the result is always valid UTF-8.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Owned copy of `s` truncated to `max_chars`, failing instead of aborting
/// when the allocation cannot be satisfied.
pub fn try_bounded_copy(s: &str, max_chars: usize) -> Result<String, TryReserveError> {
    let prefix = truncate_chars(s, max_chars);
    let mut out = String::new();
    out.try_reserve_exact(prefix.len())?;
    out.push_str(prefix);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_bound() {
        assert_eq!(truncate_chars("SP", 4), "SP");
        assert_eq!(truncate_chars("", 4), "");
    }

    #[test]
    fn test_truncate_exact_bound() {
        assert_eq!(truncate_chars("ABCD", 4), "ABCD");
    }

    #[test]
    fn test_truncate_longer_than_bound() {
        assert_eq!(truncate_chars("ABCDEFG", 4), "ABCD");
        assert_eq!(truncate_chars("ABCDEFG", 0), "");
    }

    #[test]
    fn test_truncate_keeps_char_boundaries() {
        // each 'ã' is two bytes
        assert_eq!(truncate_chars("ãããã", 2), "ãã");
        assert_eq!(truncate_chars("São Paulo", 3), "São");
    }

    #[test]
    fn test_bounded_copy() {
        let copy = try_bounded_copy("Centro-Oeste", 6).unwrap();
        assert_eq!(copy, "Centro");
    }
}
