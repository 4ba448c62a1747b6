//! # Selective Disclosure Configuration
//!
//! Digest pair, padding targets and store sizing for the disclosure service.

use serde::{Deserialize, Serialize};
use shared_crypto::DigestAlgorithm;

use crate::domain::{
    ComponentPadding, ComponentPaddingBuilder, DisclosureError, OutputState, StateRef,
    TreeDigests,
};

/// Selective disclosure configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureConfig {
    /// Digest over `nonce || component`, also used to derive nonces.
    pub leaf_digest: DigestAlgorithm,

    /// Digest over `left || right` Merkle nodes.
    pub node_digest: DigestAlgorithm,

    /// Padding targets and fillers. Validated by [`Self::component_padding`].
    pub padding: ComponentPaddingBuilder,

    /// Transactions kept by the in-memory store.
    pub store_capacity: usize,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            leaf_digest: DigestAlgorithm::Blake3,
            node_digest: DigestAlgorithm::Sha256,
            padding: padding_with_target(2),
            store_capacity: 10_000,
        }
    }
}

impl DisclosureConfig {
    /// Create a config for testing (wider padding, small store).
    pub fn for_testing() -> Self {
        Self {
            padding: padding_with_target(4),
            store_capacity: 64,
            ..Self::default()
        }
    }

    /// Leaf and node digests.
    pub fn digests(&self) -> TreeDigests {
        TreeDigests::new(self.leaf_digest, self.node_digest)
    }

    /// Validated padding.
    pub fn component_padding(&self) -> Result<ComponentPadding, DisclosureError> {
        self.padding.clone().build()
    }
}

fn padding_with_target(size: usize) -> ComponentPaddingBuilder {
    ComponentPadding::builder()
        .inputs(size, StateRef::new([0u8; 32], 0))
        .outputs(
            size,
            OutputState {
                discriminant: u32::MAX,
                data: Vec::new(),
            },
        )
        .references(size, StateRef::new([0u8; 32], 0))
        .signers(size, vec![0u8; 32])
}
