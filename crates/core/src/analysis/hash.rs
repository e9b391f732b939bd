//! Content hashing for record identity.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of a string's UTF-8 bytes.
///
/// Equal strings always produce equal digests, and the digest doubles as
/// the record id. The algorithm is a versioned format detail: changing it
/// changes every existing identifier.
pub fn content_hash(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(content_hash("hello"), content_hash("hello"));
    }

    #[test]
    fn test_hash_known_values() {
        assert_eq!(
            content_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            content_hash("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_different_strings_differ() {
        assert_ne!(content_hash("hello"), content_hash("hello "));
        assert_ne!(content_hash("a"), content_hash("A"));
    }

    #[test]
    fn test_hash_is_lowercase_hex_of_fixed_length() {
        let digest = content_hash("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
