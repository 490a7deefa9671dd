#![forbid(unsafe_code)]

//! Content digests of a pattern's string form.
//!
//! These are fingerprints for storage and comparison, not password
//! hashes: there is no salt and no work factor.

use md5::Md5;
use patternlock_core::Pattern;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::text::encode;

/// Supported digest functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Md5,
    Sha256,
}

impl HashAlgorithm {
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Md5, Self::Sha256];

    /// Lowercase name, as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Md5 => 16,
            Self::Sha256 => 32,
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw digest of the UTF-8 bytes of [`encode`]`(pattern)`.
#[must_use]
pub fn digest(pattern: &Pattern, algorithm: HashAlgorithm) -> Vec<u8> {
    let encoded = encode(pattern);
    let bytes = encoded.as_bytes();
    match algorithm {
        HashAlgorithm::Sha1 => Sha1::digest(bytes).to_vec(),
        HashAlgorithm::Md5 => Md5::digest(bytes).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(bytes).to_vec(),
    }
}

/// Lowercase hex digest of the pattern's string form.
#[must_use]
pub fn hash(pattern: &Pattern, algorithm: HashAlgorithm) -> String {
    hex_encode(&digest(pattern, algorithm))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::from_ids;
    use patternlock_core::Grid;

    fn pattern(ids: &[u32]) -> Pattern {
        from_ids(Grid::default(), ids.iter().copied()).unwrap()
    }

    #[test]
    fn known_vectors_for_digit_string() {
        // encode([0, 1, 2]) == "012"
        let p = pattern(&[0, 1, 2]);
        assert_eq!(
            hash(&p, HashAlgorithm::Sha1),
            "c4a2d99bc28d236098a095277b7eb0718d6be068"
        );
        assert_eq!(hash(&p, HashAlgorithm::Md5), "d2490f048dc3b77a457e3e450ab4eb38");
        assert_eq!(
            hash(&p, HashAlgorithm::Sha256),
            "bf6aaaab7c143ca12ae448c69fb72bb4cf1b29154b9086a927a0a91ae334cdf7"
        );
    }

    #[test]
    fn empty_pattern_hashes_empty_input() {
        let p = Pattern::new(Grid::default());
        assert_eq!(
            hash(&p, HashAlgorithm::Sha1),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
        assert_eq!(hash(&p, HashAlgorithm::Md5), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            hash(&p, HashAlgorithm::Sha256),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_lengths_match_algorithm() {
        let p = pattern(&[4, 0, 8]);
        for algorithm in HashAlgorithm::ALL {
            let hex = hash(&p, algorithm);
            assert_eq!(hex.len(), algorithm.output_len() * 2, "{algorithm}");
            assert!(hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
        }
    }

    #[test]
    fn deterministic_and_order_sensitive() {
        let a = pattern(&[0, 4, 8]);
        let b = pattern(&[8, 4, 0]);
        for algorithm in HashAlgorithm::ALL {
            assert_eq!(hash(&a, algorithm), hash(&a.clone(), algorithm));
            assert_ne!(hash(&a, algorithm), hash(&b, algorithm));
        }
    }
}
