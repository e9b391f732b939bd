//! String analysis - derives structural properties from raw strings.
//!
//! The analyzer is a pure function: the same input always yields the same
//! [`StringProperties`], and the content hash doubles as record identity,
//! so re-analyzing a string can never produce a second record.

mod hash;

pub use hash::content_hash;

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Structural properties derived from a string. Immutable once computed.
///
/// All character semantics are Unicode-scalar based, not locale aware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Count of Unicode scalar values in the original string.
    pub length: u32,
    /// True iff the string, lowercased with whitespace removed, reads the
    /// same in both directions. Empty and single-char strings qualify.
    pub is_palindrome: bool,
    /// Distinct characters in the lowercased string (whitespace included).
    pub unique_characters: u32,
    /// Maximal non-whitespace runs in the original string.
    pub word_count: u32,
    /// Content hash of the original string (see [`content_hash`]).
    pub sha256_hash: String,
    /// Per-character occurrence counts over the original string,
    /// case-sensitive, whitespace included. JSON renders the char keys as
    /// single-character strings.
    pub character_frequency_map: HashMap<char, u32>,
}

/// A stored string together with its derived properties.
///
/// Created once at analysis time and never mutated; removed only by
/// explicit deletion. `id` is always equal to `properties.sha256_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringRecord {
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyze a string and wrap it into a record stamped with the current
    /// time. Two records built from equal values share the same id.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at: Utc::now(),
        }
    }
}

/// Compute the full property set for a string.
pub fn analyze(value: &str) -> StringProperties {
    let lowered = value.to_lowercase();

    StringProperties {
        length: value.chars().count() as u32,
        is_palindrome: is_palindrome(&lowered),
        unique_characters: lowered.chars().collect::<HashSet<_>>().len() as u32,
        word_count: value.split_whitespace().count() as u32,
        sha256_hash: content_hash(value),
        character_frequency_map: character_frequency_map(value),
    }
}

/// Two-pointer palindrome check over a lowercased string, ignoring
/// whitespace. Pointers crossing without a mismatch means palindrome.
fn is_palindrome(lowered: &str) -> bool {
    let chars: Vec<char> = lowered.chars().filter(|c| !c.is_whitespace()).collect();
    let mut i = 0;
    let mut j = chars.len();
    while i + 1 < j {
        if chars[i] != chars[j - 1] {
            return false;
        }
        i += 1;
        j -= 1;
    }
    true
}

fn character_frequency_map(value: &str) -> HashMap<char, u32> {
    let mut map = HashMap::new();
    for ch in value.chars() {
        *map.entry(ch).or_insert(0) += 1;
    }
    map
}
