//! # UTXO Commitment
//!
//! A state's serialized content plus its nonce, checkable against the output
//! leaf hash a prior transaction recorded for it.
//!
//! ## Verification
//!
//! 1. Resolve the prior transaction by `state_ref.tx_id`
//! 2. Recompute `leaf_digest(nonce || serialized_content)`
//! 3. Compare with the prior transaction's output leaf hash at `state_ref.index`
//!
//! Nothing else of the prior transaction is needed or revealed.

use serde::{Deserialize, Serialize};
use shared_crypto::Hash;

use super::entities::StateRef;
use super::errors::DisclosureError;
use super::value_objects::{Component, Nonce, TreeDigests};
use crate::ports::TransactionStorage;

/// Transferable proof of a state's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoCommitment {
    /// Output this state was produced as.
    pub state_ref: StateRef,
    /// Serialized output content.
    pub serialized_content: Component,
    /// Nonce of that output leaf.
    pub nonce: Nonce,
}

impl UtxoCommitment {
    /// Create a commitment.
    pub fn new(state_ref: StateRef, serialized_content: Component, nonce: Nonce) -> Self {
        Self {
            state_ref,
            serialized_content,
            nonce,
        }
    }

    /// Leaf hash this commitment claims.
    pub fn leaf_hash(&self, digests: TreeDigests) -> Hash {
        digests.hash_leaf(&self.nonce, &self.serialized_content)
    }

    /// Verify against the producing transaction, resolved through `storage`.
    ///
    /// ## Errors
    ///
    /// - `TransactionResolution`: producing transaction unknown
    /// - `OutputNotFound`: no output at the claimed index
    /// - `HashMismatch`: content or nonce differ from what was recorded
    /// - `Storage`: the lookup itself failed
    pub fn verify<S>(&self, storage: &S) -> Result<(), DisclosureError>
    where
        S: TransactionStorage + ?Sized,
    {
        let tx_id = self.state_ref.tx_id;
        let index = self.state_ref.index;

        let prior = storage.get_transaction(&tx_id)?.ok_or_else(|| {
            tracing::warn!(tx = %hex::encode(&tx_id[..8]), "producing transaction not found");
            DisclosureError::TransactionResolution { tx_id }
        })?;

        if prior.id() != tx_id {
            tracing::warn!(tx = %hex::encode(&tx_id[..8]), "storage returned another transaction");
            return Err(DisclosureError::HashMismatch {
                context: "resolved transaction id".to_string(),
                expected: tx_id,
                computed: prior.id(),
            });
        }

        let expected = prior
            .output_leaf_hash(index)
            .ok_or(DisclosureError::OutputNotFound { tx_id, index })?;
        let computed = self.leaf_hash(prior.digests());
        if computed != expected {
            tracing::warn!(
                tx = %hex::encode(&tx_id[..8]),
                index,
                "output leaf hash mismatch"
            );
            return Err(DisclosureError::HashMismatch {
                context: format!("output {} leaf", index),
                expected,
                computed,
            });
        }

        tracing::debug!(tx = %hex::encode(&tx_id[..8]), index, "utxo commitment verified");
        Ok(())
    }
}
