//! # Partial Transaction View
//!
//! Verifier-side reconstruction from a [`TransactionDisclosure`].
//!
//! ## Reconstruction Rules
//!
//! | Material | Group root |
//! |----------|------------|
//! | Disclosed components + nonces | recomputed from leaves |
//! | Hidden group root | inherited verbatim |
//! | Output leaf hashes | recomputed from the hashes, never from content |
//! | Nothing | sentinel |
//!
//! The recomputed top-level list must equal the prover-issued list entry by
//! entry, and its root must equal the transaction id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared_crypto::Hash;

use super::errors::DisclosureError;
use super::padding::ComponentPadding;
use super::value_objects::{Component, ComponentGroupKind, Nonce, TreeDigests};
use crate::algorithms::{merkle_root, top_level_list};

/// What a prover transmits for one transaction.
///
/// Every list keeps the prover's order; nothing is sorted or deduplicated in
/// transit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDisclosure {
    /// Digest pair used by the prover.
    pub digests: TreeDigests,
    /// Plaintext of disclosed groups by ordinal.
    pub disclosed_components: BTreeMap<u32, Vec<Component>>,
    /// Nonces of disclosed groups by ordinal.
    pub disclosed_nonces: BTreeMap<u32, Vec<Nonce>>,
    /// Inherited roots of hidden groups by ordinal.
    pub hidden_group_roots: BTreeMap<u32, Hash>,
    /// Leaf hashes of the outputs group.
    pub output_leaf_hashes: Vec<Hash>,
    /// Group roots as issued by the prover.
    pub top_level_roots: Vec<Hash>,
    /// Claimed transaction id.
    pub id: Hash,
}

/// A transaction as seen by a verifier entitled to a subset of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialTransactionView {
    disclosure: TransactionDisclosure,
    group_roots: BTreeMap<u32, Hash>,
    top_level_roots: Vec<Hash>,
    top_root: Hash,
}

impl PartialTransactionView {
    /// Recompute every derivable root from disclosed material.
    ///
    /// Fails with `MalformedDisclosure` on structural inconsistency only; use
    /// [`Self::verify`] to check the result against the claimed id.
    pub fn reconstruct(disclosure: TransactionDisclosure) -> Result<Self, DisclosureError> {
        check_structure(&disclosure)?;

        let digests = disclosure.digests;
        let mut group_roots = BTreeMap::new();

        for (&ordinal, components) in &disclosure.disclosed_components {
            let leaves: Vec<Hash> = disclosure
                .disclosed_nonces
                .get(&ordinal)
                .into_iter()
                .flatten()
                .zip(components)
                .map(|(nonce, component)| digests.hash_leaf(nonce, component))
                .collect();
            group_roots.insert(ordinal, merkle_root(&leaves, digests.node));
        }
        for (&ordinal, &root) in &disclosure.hidden_group_roots {
            group_roots.insert(ordinal, root);
        }
        group_roots.insert(
            ComponentGroupKind::Outputs.ordinal(),
            merkle_root(&disclosure.output_leaf_hashes, digests.node),
        );

        let top_level_roots = top_level_list(&group_roots);
        let top_root = merkle_root(&top_level_roots, digests.node);

        tracing::debug!(
            id = %hex::encode(&disclosure.id[..8]),
            disclosed = disclosure.disclosed_components.len(),
            hidden = disclosure.hidden_group_roots.len(),
            "partial transaction view reconstructed"
        );

        Ok(Self {
            disclosure,
            group_roots,
            top_level_roots,
            top_root,
        })
    }

    /// Check recomputed roots against the prover-issued list and the id.
    pub fn verify(&self) -> Result<(), DisclosureError> {
        let issued = &self.disclosure.top_level_roots;
        if issued.len() != self.top_level_roots.len() {
            tracing::warn!(
                issued = issued.len(),
                recomputed = self.top_level_roots.len(),
                "top-level root list length mismatch"
            );
            return Err(DisclosureError::MalformedDisclosure(format!(
                "{} top-level roots issued, {} recomputed",
                issued.len(),
                self.top_level_roots.len()
            )));
        }

        for (ordinal, (expected, computed)) in
            issued.iter().zip(&self.top_level_roots).enumerate()
        {
            if expected != computed {
                tracing::warn!(group = ordinal, "group root mismatch");
                return Err(DisclosureError::HashMismatch {
                    context: format!("group {} root", ordinal),
                    expected: *expected,
                    computed: *computed,
                });
            }
        }

        if self.top_root != self.disclosure.id {
            tracing::warn!("transaction id mismatch");
            return Err(DisclosureError::HashMismatch {
                context: "transaction id".to_string(),
                expected: self.disclosure.id,
                computed: self.top_root,
            });
        }
        Ok(())
    }

    /// [`Self::verify`], then require the id the caller expects.
    pub fn verify_against(&self, expected_id: &Hash) -> Result<(), DisclosureError> {
        self.verify()?;
        if self.top_root != *expected_id {
            tracing::warn!("partial view does not match expected transaction");
            return Err(DisclosureError::HashMismatch {
                context: "expected transaction id".to_string(),
                expected: *expected_id,
                computed: self.top_root,
            });
        }
        Ok(())
    }

    /// [`Self::verify`], then require every group validation depends on.
    pub fn verify_for_validation(&self) -> Result<(), DisclosureError> {
        self.verify()?;
        for kind in ComponentGroupKind::MANDATORY_FOR_VERIFICATION {
            if !self.is_disclosed(kind) {
                tracing::warn!(group = %kind, "mandatory group not disclosed");
                return Err(DisclosureError::DisclosureInvariant { group: kind });
            }
        }
        Ok(())
    }

    /// Require the padded shape a prover with `padding` must produce.
    ///
    /// Present inputs, references and output leaf hashes must number exactly
    /// their padding target, and leaf and node digests must differ.
    pub fn verify_cardinality(&self, padding: &ComponentPadding) -> Result<(), DisclosureError> {
        if !self.disclosure.digests.is_separated() {
            tracing::warn!(digest = %self.disclosure.digests.leaf, "leaf and node digests coincide");
            return Err(DisclosureError::MalformedDisclosure(format!(
                "leaf and node digest are both {}",
                self.disclosure.digests.leaf
            )));
        }

        let counts = [
            (
                ComponentGroupKind::Inputs,
                self.disclosed_components(ComponentGroupKind::Inputs)
                    .map_or(0, <[Component]>::len),
            ),
            (
                ComponentGroupKind::Outputs,
                self.disclosure.output_leaf_hashes.len(),
            ),
            (
                ComponentGroupKind::References,
                self.disclosed_components(ComponentGroupKind::References)
                    .map_or(0, <[Component]>::len),
            ),
        ];
        for (kind, actual) in counts {
            let target = padding.target(kind);
            if actual != 0 && target != Some(actual) {
                tracing::warn!(group = %kind, actual, ?target, "padded group has wrong cardinality");
                return Err(DisclosureError::MalformedDisclosure(format!(
                    "group {} carries {} entries, padded size is {:?}",
                    kind, actual, target
                )));
            }
        }
        Ok(())
    }

    /// Claimed transaction id.
    pub fn id(&self) -> Hash {
        self.disclosure.id
    }

    /// Recomputed top root.
    pub fn top_root(&self) -> Hash {
        self.top_root
    }

    /// Digest pair carried by the disclosure.
    pub fn digests(&self) -> TreeDigests {
        self.disclosure.digests
    }

    /// Roots of every group with material, disclosed or inherited.
    pub fn group_roots(&self) -> &BTreeMap<u32, Hash> {
        &self.group_roots
    }

    /// Recomputed top-level list.
    pub fn top_level_roots(&self) -> &[Hash] {
        &self.top_level_roots
    }

    /// Nonces of disclosed groups.
    pub fn component_nonces(&self) -> &BTreeMap<u32, Vec<Nonce>> {
        &self.disclosure.disclosed_nonces
    }

    /// Output leaf hashes, in output order.
    pub fn output_leaf_hashes(&self) -> &[Hash] {
        &self.disclosure.output_leaf_hashes
    }

    /// Leaf hash of one output.
    pub fn output_leaf_hash(&self, index: u32) -> Option<Hash> {
        self.disclosure
            .output_leaf_hashes
            .get(index as usize)
            .copied()
    }

    /// Whether `kind` arrived as plaintext.
    pub fn is_disclosed(&self, kind: ComponentGroupKind) -> bool {
        self.disclosure
            .disclosed_components
            .contains_key(&kind.ordinal())
    }

    /// Plaintext of a disclosed group.
    pub fn disclosed_components(&self, kind: ComponentGroupKind) -> Option<&[Component]> {
        self.disclosure
            .disclosed_components
            .get(&kind.ordinal())
            .map(Vec::as_slice)
    }

    /// The disclosure this view was rebuilt from.
    pub fn disclosure(&self) -> &TransactionDisclosure {
        &self.disclosure
    }
}

fn check_structure(disclosure: &TransactionDisclosure) -> Result<(), DisclosureError> {
    let malformed = |message: String| {
        tracing::warn!(%message, "malformed disclosure");
        Err(DisclosureError::MalformedDisclosure(message))
    };
    let outputs = ComponentGroupKind::Outputs.ordinal();

    for (ordinal, components) in &disclosure.disclosed_components {
        let Some(nonces) = disclosure.disclosed_nonces.get(ordinal) else {
            return malformed(format!("group {} has no nonces", ordinal));
        };
        if nonces.len() != components.len() {
            return malformed(format!(
                "group {} has {} components but {} nonces",
                ordinal,
                components.len(),
                nonces.len()
            ));
        }
        if disclosure.hidden_group_roots.contains_key(ordinal) {
            return malformed(format!("group {} is both disclosed and hidden", ordinal));
        }
    }
    if let Some(ordinal) = disclosure
        .disclosed_nonces
        .keys()
        .find(|ordinal| !disclosure.disclosed_components.contains_key(ordinal))
    {
        return malformed(format!("nonces for undisclosed group {}", ordinal));
    }
    if disclosure.disclosed_components.contains_key(&outputs)
        || disclosure.hidden_group_roots.contains_key(&outputs)
    {
        return malformed("outputs must travel as leaf hashes".to_string());
    }
    Ok(())
}
