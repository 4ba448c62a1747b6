//! # Transaction Commitment
//!
//! One commitment type with a prover variant and a verifier variant, sharing
//! the interface cross-transaction checks need.

use std::collections::BTreeMap;

use shared_crypto::Hash;

use super::full_view::FullTransactionView;
use super::partial_view::PartialTransactionView;
use super::value_objects::{Nonce, TreeDigests};

/// A transaction known either in full or through a partial view.
#[derive(Debug, Clone)]
pub enum TransactionCommitment {
    /// Prover side.
    Full(FullTransactionView),
    /// Verifier side.
    Partial(PartialTransactionView),
}

impl TransactionCommitment {
    /// Transaction id.
    pub fn id(&self) -> Hash {
        match self {
            Self::Full(view) => view.id(),
            Self::Partial(view) => view.id(),
        }
    }

    /// Top root as computed by this side.
    pub fn top_root(&self) -> Hash {
        match self {
            Self::Full(view) => view.top_root(),
            Self::Partial(view) => view.top_root(),
        }
    }

    /// Digest pair.
    pub fn digests(&self) -> TreeDigests {
        match self {
            Self::Full(view) => view.digests(),
            Self::Partial(view) => view.digests(),
        }
    }

    /// Known group roots by ordinal.
    pub fn group_roots(&self) -> &BTreeMap<u32, Hash> {
        match self {
            Self::Full(view) => view.group_roots(),
            Self::Partial(view) => view.group_roots(),
        }
    }

    /// Known nonces by ordinal.
    pub fn component_nonces(&self) -> &BTreeMap<u32, Vec<Nonce>> {
        match self {
            Self::Full(view) => view.component_nonces(),
            Self::Partial(view) => view.component_nonces(),
        }
    }

    /// Output leaf hashes.
    pub fn output_leaf_hashes(&self) -> &[Hash] {
        match self {
            Self::Full(view) => view.output_leaf_hashes(),
            Self::Partial(view) => view.output_leaf_hashes(),
        }
    }

    /// Leaf hash of one output.
    pub fn output_leaf_hash(&self, index: u32) -> Option<Hash> {
        self.output_leaf_hashes().get(index as usize).copied()
    }

    /// Whether this is the prover's view.
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full(_))
    }
}

impl From<FullTransactionView> for TransactionCommitment {
    fn from(view: FullTransactionView) -> Self {
        Self::Full(view)
    }
}

impl From<PartialTransactionView> for TransactionCommitment {
    fn from(view: PartialTransactionView) -> Self {
        Self::Partial(view)
    }
}
