//! Query/question text normalization.

use std::collections::HashSet;

/// Normalize text into its set of distinct tokens.
///
/// Lower-cases the input and extracts maximal runs of alphanumeric
/// characters (Unicode — Hangul counts) as tokens. Repeats collapse: a
/// token occurring five times contributes once.
pub fn normalize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fold a whole string for containment comparison: trim + lower-case.
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> HashSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("사고 접수 방법"), set(&["사고", "접수", "방법"]));
    }

    #[test]
    fn test_normalize_case_and_whitespace() {
        assert_eq!(
            normalize("  Annual   LEAVE\tpolicy "),
            normalize("annual leave policy")
        );
    }

    #[test]
    fn test_normalize_punctuation_splits_tokens() {
        assert_eq!(normalize("사고,접수?방법!"), set(&["사고", "접수", "방법"]));
    }

    #[test]
    fn test_normalize_duplicates_collapse() {
        assert_eq!(normalize("접수 접수 접수"), set(&["접수"]));
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize("").is_empty());
        assert!(normalize("  \t\n ").is_empty());
        assert!(normalize("!?—…").is_empty());
    }

    #[test]
    fn test_normalize_idempotent_over_rejoin() {
        let original = normalize("  보험금  청구 Claim 절차 ");
        let mut rejoined: Vec<String> = original.iter().cloned().collect();
        rejoined.sort();
        assert_eq!(normalize(&rejoined.join(" ")), original);
    }

    #[test]
    fn test_fold() {
        assert_eq!(fold("  사고 접수 "), "사고 접수");
        assert_eq!(fold("Annual Leave"), "annual leave");
    }
}
