//! Filter criteria for querying stored strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A set of independently optional predicates, combined by logical AND.
///
/// An absent field imposes no constraint; criteria with no fields present
/// match every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Exact match on the palindrome flag.
    pub is_palindrome: Option<bool>,
    /// Record length must be >= this.
    pub min_length: Option<u32>,
    /// Record length must be <= this.
    pub max_length: Option<u32>,
    /// Exact match on word count.
    pub word_count: Option<u32>,
    /// Record must contain this character. Expected to be exactly one
    /// character; longer values never match any record.
    pub contains_character: Option<String>,
}

/// Errors from boundary-time criteria validation.
#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("min_length ({min}) cannot be greater than max_length ({max})")]
    InvalidRange { min: u32, max: u32 },
}

impl FilterCriteria {
    /// True when no field is present.
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }

    /// Validate range consistency. Called on the structured-query path
    /// before evaluation; the evaluator itself stays total.
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
            if min > max {
                return Err(CriteriaError::InvalidRange { min, max });
            }
        }
        Ok(())
    }
}
