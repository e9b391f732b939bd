//! Structured filtering over analyzed string records.
//!
//! The evaluator is pure and total: malformed criteria values (e.g. a
//! multi-character `contains_character`) simply never match instead of
//! erroring. Range validation happens at the boundary, not here.

mod types;

pub use types::{CriteriaError, FilterCriteria};

use crate::analysis::{StringProperties, StringRecord};

impl FilterCriteria {
    /// True iff every present predicate holds for the given properties.
    pub fn matches(&self, props: &StringProperties) -> bool {
        if let Some(is_palindrome) = self.is_palindrome {
            if props.is_palindrome != is_palindrome {
                return false;
            }
        }
        if let Some(min) = self.min_length {
            if props.length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if props.length > max {
                return false;
            }
        }
        if let Some(word_count) = self.word_count {
            if props.word_count != word_count {
                return false;
            }
        }
        if let Some(ref needle) = self.contains_character {
            let mut chars = needle.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    if !props.character_frequency_map.contains_key(&ch) {
                        return false;
                    }
                }
                // Empty or multi-character values can never match.
                _ => return false,
            }
        }
        true
    }
}

/// Apply criteria to a sequence of records, keeping the matching ones.
///
/// Order-preserving and stable; the result is a subsequence of the input.
pub fn evaluate(records: Vec<StringRecord>, criteria: &FilterCriteria) -> Vec<StringRecord> {
    records
        .into_iter()
        .filter(|r| criteria.matches(&r.properties))
        .collect()
}
