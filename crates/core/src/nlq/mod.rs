//! Natural-language query translation.
//!
//! Turns a small dialect of free-text queries ("single word palindromes
//! containing the letter z") into [`FilterCriteria`]. Matching is
//! case-insensitive; the query is trimmed and lowercased first.
//!
//! Rules live in [`RULES`] and are applied in that fixed order. Each rule
//! independently assigns one criteria field, so several can fire from one
//! query. When more than one rule assigns `contains_character` the last
//! one wins - a query matching multiple contains-character patterns
//! silently keeps the final assignment.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::filter::FilterCriteria;

/// Outcome of translating a free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// True when at least one rule recognized something.
    pub success: bool,
    /// Reserved for future mutually-exclusive-signal detection. No rule
    /// combination is treated as conflicting today, so this is always
    /// false; the field keeps the contract shape stable.
    pub conflicting: bool,
    /// Parsed criteria; empty when `success` is false.
    pub criteria: FilterCriteria,
}

/// A single field assignment produced by one rule.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Effect {
    WordCount(u32),
    Palindrome(bool),
    MinLength(u32),
    MaxLength(u32),
    ContainsCharacter(char),
}

static LONGER_THAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"longer than (\d+)").unwrap());
static SHORTER_THAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"shorter than (\d+)").unwrap());
static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"letter ([a-z])").unwrap());
static CONTAINS_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"contain(?:s|ing)? (?:the )?([a-z])\b").unwrap());

/// Pattern rules in application order. Order is load-bearing for the
/// documented last-wins behavior on `contains_character`.
const RULES: &[fn(&str) -> Option<Effect>] = &[
    rule_single_word,
    rule_palindrome,
    rule_longer_than,
    rule_shorter_than,
    rule_letter,
    rule_contains_letter,
    rule_first_vowel,
];

/// Translate a free-text query into filter criteria.
///
/// `success` is true iff at least one rule fired; on failure the criteria
/// come back empty. Pure function, no store access.
pub fn translate(query: &str) -> Translation {
    let lowered = query.trim().to_lowercase();

    let mut criteria = FilterCriteria::default();
    for rule in RULES {
        if let Some(effect) = rule(&lowered) {
            apply(&mut criteria, effect);
        }
    }

    Translation {
        success: !criteria.is_empty(),
        conflicting: false,
        criteria,
    }
}

fn apply(criteria: &mut FilterCriteria, effect: Effect) {
    match effect {
        Effect::WordCount(n) => criteria.word_count = Some(n),
        Effect::Palindrome(p) => criteria.is_palindrome = Some(p),
        Effect::MinLength(n) => criteria.min_length = Some(n),
        Effect::MaxLength(n) => criteria.max_length = Some(n),
        Effect::ContainsCharacter(ch) => criteria.contains_character = Some(ch.to_string()),
    }
}

fn rule_single_word(query: &str) -> Option<Effect> {
    (query.contains("single word") || query.contains("one word")).then_some(Effect::WordCount(1))
}

/// "palindrom" covers palindrome, palindromes, palindromic.
fn rule_palindrome(query: &str) -> Option<Effect> {
    query.contains("palindrom").then_some(Effect::Palindrome(true))
}

/// "longer than N" means strictly greater, so the bound becomes N + 1.
fn rule_longer_than(query: &str) -> Option<Effect> {
    let caps = LONGER_THAN.captures(query)?;
    let n: u32 = caps[1].parse().ok()?;
    Some(Effect::MinLength(n.saturating_add(1)))
}

/// "shorter than N" means strictly less, so the bound becomes N - 1.
/// "shorter than 0" constrains nothing and is dropped without being
/// treated as a parse error.
fn rule_shorter_than(query: &str) -> Option<Effect> {
    let caps = SHORTER_THAN.captures(query)?;
    let n: u32 = caps[1].parse().ok()?;
    (n > 0).then(|| Effect::MaxLength(n - 1))
}

fn rule_letter(query: &str) -> Option<Effect> {
    let caps = LETTER.captures(query)?;
    caps[1].chars().next().map(Effect::ContainsCharacter)
}

/// "contains z" / "containing the z". The captured char must stand alone,
/// so this does not fire on "containing the letter z" (rule_letter covers
/// that phrasing).
fn rule_contains_letter(query: &str) -> Option<Effect> {
    let caps = CONTAINS_LETTER.captures(query)?;
    caps[1].chars().next().map(Effect::ContainsCharacter)
}

/// "first vowel" is substituted literally with 'a'; nothing resolves
/// "first vowel of what".
fn rule_first_vowel(query: &str) -> Option<Effect> {
    query
        .contains("first vowel")
        .then_some(Effect::ContainsCharacter('a'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        let t = translate("single word strings");
        assert!(t.success);
        assert_eq!(t.criteria.word_count, Some(1));

        let t = translate("strings with one word");
        assert_eq!(t.criteria.word_count, Some(1));
    }

    #[test]
    fn test_palindrome_variants() {
        for query in ["palindromes", "palindromic strings", "a palindrome"] {
            let t = translate(query);
            assert!(t.success, "query: {}", query);
            assert_eq!(t.criteria.is_palindrome, Some(true));
        }
    }

    #[test]
    fn test_longer_than_is_strict() {
        let t = translate("strings longer than 5");
        assert!(t.success);
        assert_eq!(t.criteria.min_length, Some(6));
        assert_eq!(t.criteria.max_length, None);
    }

    #[test]
    fn test_shorter_than_is_strict() {
        let t = translate("strings shorter than 10");
        assert!(t.success);
        assert_eq!(t.criteria.max_length, Some(9));
    }

    #[test]
    fn test_shorter_than_zero_is_silent_noop() {
        let t = translate("strings shorter than 0");
        assert!(!t.success);
        assert!(t.criteria.is_empty());

        // Another signal still makes the query parse.
        let t = translate("palindromes shorter than 0");
        assert!(t.success);
        assert_eq!(t.criteria.is_palindrome, Some(true));
        assert_eq!(t.criteria.max_length, None);
    }

    #[test]
    fn test_letter_pattern() {
        let t = translate("strings with the letter q");
        assert!(t.success);
        assert_eq!(t.criteria.contains_character, Some("q".to_string()));
    }

    #[test]
    fn test_contains_standalone_letter() {
        let t = translate("strings that contain z");
        assert_eq!(t.criteria.contains_character, Some("z".to_string()));

        let t = translate("strings containing the x");
        assert_eq!(t.criteria.contains_character, Some("x".to_string()));
    }

    #[test]
    fn test_contains_does_not_misfire_on_letter_phrase() {
        // "containing the letter z" must resolve via the letter rule, not
        // by capturing the 'l' of "letter".
        let t = translate("containing the letter z");
        assert_eq!(t.criteria.contains_character, Some("z".to_string()));
    }

    #[test]
    fn test_contains_overwrites_letter_rule() {
        // Both patterns fire; the later rule wins.
        let t = translate("letter b strings that contain z");
        assert_eq!(t.criteria.contains_character, Some("z".to_string()));
    }

    #[test]
    fn test_first_vowel_wins_last() {
        let t = translate("strings with the letter z and the first vowel");
        assert_eq!(t.criteria.contains_character, Some("a".to_string()));
    }

    #[test]
    fn test_composite_query() {
        let t = translate("single word palindromes containing the letter z");
        assert!(t.success);
        assert!(!t.conflicting);
        assert_eq!(t.criteria.word_count, Some(1));
        assert_eq!(t.criteria.is_palindrome, Some(true));
        assert_eq!(t.criteria.contains_character, Some("z".to_string()));
        assert_eq!(t.criteria.min_length, None);
        assert_eq!(t.criteria.max_length, None);
    }

    #[test]
    fn test_unrecognized_query_fails() {
        let t = translate("banana splits are great");
        assert!(!t.success);
        assert!(!t.conflicting);
        assert!(t.criteria.is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let t = translate("  Single Word PALINDROMES Longer Than 3  ");
        assert_eq!(t.criteria.word_count, Some(1));
        assert_eq!(t.criteria.is_palindrome, Some(true));
        assert_eq!(t.criteria.min_length, Some(4));
    }

    #[test]
    fn test_bounds_compose_without_conflict_detection() {
        // Contradictory bounds parse fine; conflict detection is reserved.
        let t = translate("longer than 10 and shorter than 5");
        assert!(t.success);
        assert!(!t.conflicting);
        assert_eq!(t.criteria.min_length, Some(11));
        assert_eq!(t.criteria.max_length, Some(4));
    }
}
