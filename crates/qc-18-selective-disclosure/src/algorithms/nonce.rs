//! # Nonce Derivation
//!
//! `nonce = H(salt || be32(group_index) || be32(component_index))`
//!
//! A nonce depends on the salt and its position only, never on content or on
//! other nonces. Revealing one leaf's nonce therefore reveals nothing about
//! any other leaf, which is what makes leaf-by-leaf disclosure possible.

use shared_crypto::DigestAlgorithm;

use crate::domain::{Nonce, PrivacySalt};

/// Derive the blinding nonce of one leaf.
pub fn derive_nonce(
    salt: &PrivacySalt,
    group_index: u32,
    component_index: u32,
    digest: DigestAlgorithm,
) -> Nonce {
    digest.hash_many(&[
        salt.as_bytes().as_slice(),
        group_index.to_be_bytes().as_slice(),
        component_index.to_be_bytes().as_slice(),
    ])
}

/// Nonces for positions `0..count` of one group.
pub fn derive_group_nonces(
    salt: &PrivacySalt,
    group_index: u32,
    count: usize,
    digest: DigestAlgorithm,
) -> Vec<Nonce> {
    (0..count as u32)
        .map(|component_index| derive_nonce(salt, group_index, component_index, digest))
        .collect()
}
