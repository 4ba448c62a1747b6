//! # Shared Crypto - Digest Primitives
//!
//! **Status:** Phase 1 Implementation
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, SHA3-256, BLAKE3 | Merkle leaves and nodes, nonce derivation |
//!
//! ## Security Properties
//!
//! - **Explicit identity**: every digest carries a stable wire id, so trees
//!   built with different leaf/node functions never verify against each other
//! - **BLAKE3**: SIMD-accelerated, suited to variable-length leaf input
//! - **SHA-256 / SHA3-256**: fixed-width 64-byte node input

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{DigestAlgorithm, Hash, HASH_LEN};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
