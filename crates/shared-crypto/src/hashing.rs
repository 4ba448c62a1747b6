//! # Digest Algorithms
//!
//! Explicitly identified 256-bit digests.
//!
//! Every commitment structure records which algorithm produced it, so a
//! verifier on another machine recomputes exactly the same bytes. The
//! identifier byte returned by [`DigestAlgorithm::id`] is part of the wire
//! format and must never be renumbered.
//!
//! ## Algorithms
//!
//! | Id | Algorithm | Typical use |
//! |----|-----------|-------------|
//! | 1 | SHA-256 | Fixed-length input (Merkle nodes) |
//! | 2 | SHA3-256 | Fixed-length input |
//! | 3 | BLAKE3 | Variable-length input (component leaves) |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Sha3_256;

use crate::errors::CryptoError;

/// 256-bit digest output.
pub type Hash = [u8; 32];

/// Digest output length in bytes.
pub const HASH_LEN: usize = 32;

/// A pluggable, explicitly identified digest function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 (FIPS 180-4).
    Sha256,
    /// SHA3-256 (FIPS 202).
    Sha3_256,
    /// BLAKE3 in default hashing mode.
    Blake3,
}

impl DigestAlgorithm {
    /// All supported algorithms, in identifier order.
    pub const ALL: [DigestAlgorithm; 3] = [Self::Sha256, Self::Sha3_256, Self::Blake3];

    /// Stable wire identifier.
    pub const fn id(self) -> u8 {
        match self {
            Self::Sha256 => 1,
            Self::Sha3_256 => 2,
            Self::Blake3 => 3,
        }
    }

    /// Resolve a wire identifier.
    pub fn from_id(id: u8) -> Result<Self, CryptoError> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == id)
            .ok_or(CryptoError::UnknownDigestId(id))
    }

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha3_256 => "sha3-256",
            Self::Blake3 => "blake3",
        }
    }

    /// Hash a single input.
    pub fn hash(self, data: &[u8]) -> Hash {
        self.hash_many(&[data])
    }

    /// Hash the concatenation of several inputs without allocating it.
    pub fn hash_many(self, inputs: &[&[u8]]) -> Hash {
        match self {
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                for input in inputs {
                    hasher.update(input);
                }
                hasher.finalize().into()
            }
            Self::Sha3_256 => {
                let mut hasher = Sha3_256::new();
                for input in inputs {
                    hasher.update(input);
                }
                hasher.finalize().into()
            }
            Self::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                for input in inputs {
                    hasher.update(input);
                }
                *hasher.finalize().as_bytes()
            }
        }
    }

    /// Hash two concatenated digests: `H(left || right)`.
    pub fn hash_pair(self, left: &Hash, right: &Hash) -> Hash {
        self.hash_many(&[left.as_slice(), right.as_slice()])
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or(CryptoError::UnknownDigestName(s.to_string()))
    }
}
