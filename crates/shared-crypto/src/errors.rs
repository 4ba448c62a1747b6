//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Digest identifier not assigned to any algorithm
    #[error("Unknown digest algorithm id: {0}")]
    UnknownDigestId(u8),

    /// Digest name not recognised
    #[error("Unknown digest algorithm: {0}")]
    UnknownDigestName(String),
}
