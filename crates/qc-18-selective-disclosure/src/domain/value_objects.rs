//! # Value Objects
//!
//! Immutable value objects for Selective Disclosure.

use std::fmt;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_crypto::{DigestAlgorithm, Hash};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::DisclosureError;

/// One serialized transaction field.
pub type Component = Vec<u8>;

/// Per-leaf blinding value.
pub type Nonce = Hash;

/// Root standing in for an absent or unknown group (all ones).
///
/// Also pairs with the unpaired node of an odd-length Merkle level.
pub const SENTINEL_HASH: Hash = [0xFF; 32];

/// Number of component roles with an assigned ordinal.
pub const KNOWN_GROUP_COUNT: u32 = 9;

/// Privacy salt width in bytes.
pub const PRIVACY_SALT_LEN: usize = 32;

/// Structural role of a component group.
///
/// The discriminant is the group ordinal. It feeds both nonce derivation and
/// the position in the top-level root list, so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComponentGroupKind {
    /// Consumed state references.
    Inputs = 0,
    /// Produced states.
    Outputs = 1,
    /// Command data.
    Commands = 2,
    /// Attachment hashes.
    Attachments = 3,
    /// Notary party.
    Notary = 4,
    /// Validity time window.
    TimeWindow = 5,
    /// Required signing keys.
    Signers = 6,
    /// Referenced (not consumed) state references.
    References = 7,
    /// Network parameters hash.
    Parameters = 8,
}

/// How a group reaches a verifier holding a partial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupVisibility {
    /// Plaintext components plus their nonces.
    Disclosed,
    /// Individual leaf hashes, never content.
    LeafHashesOnly,
    /// Only the group root, inherited verbatim.
    Hidden,
}

impl ComponentGroupKind {
    /// All known roles in ordinal order.
    pub const ALL: [ComponentGroupKind; KNOWN_GROUP_COUNT as usize] = [
        Self::Inputs,
        Self::Outputs,
        Self::Commands,
        Self::Attachments,
        Self::Notary,
        Self::TimeWindow,
        Self::Signers,
        Self::References,
        Self::Parameters,
    ];

    /// Groups a verifier cannot validate without.
    pub const MANDATORY_FOR_VERIFICATION: [ComponentGroupKind; 4] = [
        Self::Inputs,
        Self::TimeWindow,
        Self::References,
        Self::Parameters,
    ];

    /// Stable group ordinal.
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Resolve an ordinal to a known role.
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Whether the group is padded to a fixed cardinality.
    pub const fn is_paddable(self) -> bool {
        matches!(self, Self::Inputs | Self::Outputs | Self::References)
    }

    /// Visibility of this group in a partial view.
    pub const fn visibility(self) -> GroupVisibility {
        match self {
            Self::Inputs | Self::References | Self::Notary | Self::TimeWindow | Self::Parameters => {
                GroupVisibility::Disclosed
            }
            Self::Outputs => GroupVisibility::LeafHashesOnly,
            Self::Commands | Self::Attachments | Self::Signers => GroupVisibility::Hidden,
        }
    }
}

impl fmt::Display for ComponentGroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Leaf and node digest functions used to build one tree.
///
/// Both travel with every view so a verifier recomputes with the same
/// functions the prover used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeDigests {
    /// Digest over `nonce || component` and for nonce derivation.
    pub leaf: DigestAlgorithm,
    /// Digest over `left || right`.
    pub node: DigestAlgorithm,
}

impl TreeDigests {
    /// Create a digest pair.
    pub const fn new(leaf: DigestAlgorithm, node: DigestAlgorithm) -> Self {
        Self { leaf, node }
    }

    /// `leaf(nonce || component)`.
    pub fn hash_leaf(&self, nonce: &Nonce, component: &[u8]) -> Hash {
        self.leaf.hash_many(&[nonce.as_slice(), component])
    }

    /// Whether leaves and internal nodes hash under different functions.
    pub fn is_separated(&self) -> bool {
        self.leaf != self.node
    }

    /// `node(left || right)`.
    pub fn hash_node(&self, left: &Hash, right: &Hash) -> Hash {
        self.node.hash_pair(left, right)
    }
}

impl Default for TreeDigests {
    fn default() -> Self {
        Self::new(DigestAlgorithm::Blake3, DigestAlgorithm::Sha256)
    }
}

/// Per-transaction random seed for every nonce.
///
/// Never a tree leaf, never printed, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivacySalt([u8; PRIVACY_SALT_LEN]);

impl PrivacySalt {
    /// Draw a fresh salt from the OS RNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; PRIVACY_SALT_LEN];
        loop {
            rand::rngs::OsRng.fill_bytes(&mut bytes);
            if bytes.iter().any(|b| *b != 0) {
                return Self(bytes);
            }
        }
    }

    /// Wrap caller-provided salt bytes. The all-zero value is rejected.
    pub fn new(bytes: [u8; PRIVACY_SALT_LEN]) -> Result<Self, DisclosureError> {
        if bytes.iter().all(|b| *b == 0) {
            return Err(DisclosureError::Configuration(
                "privacy salt must not be all zeros".to_string(),
            ));
        }
        Ok(Self(bytes))
    }

    /// Raw salt bytes.
    pub fn as_bytes(&self) -> &[u8; PRIVACY_SALT_LEN] {
        &self.0
    }
}

impl fmt::Debug for PrivacySalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivacySalt(..)")
    }
}

/// A single node in a Merkle path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// The sibling hash at this level.
    pub hash: Hash,
    /// Position of sibling (left or right).
    pub position: SiblingPosition,
}

impl ProofNode {
    /// Sibling on the left.
    pub fn left(hash: Hash) -> Self {
        Self {
            hash,
            position: SiblingPosition::Left,
        }
    }

    /// Sibling on the right.
    pub fn right(hash: Hash) -> Self {
        Self {
            hash,
            position: SiblingPosition::Right,
        }
    }
}

/// Position of a sibling in the Merkle tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiblingPosition {
    /// Sibling precedes the running hash.
    Left,
    /// Sibling follows the running hash.
    Right,
}
