//! # Single Component Disclosure
//!
//! One component revealed on demand, with two inclusion paths:
//!
//! ```text
//! leaf(nonce || component) --group_path--> GroupRoot --top_path--> id
//! ```
//!
//! Nonces are position-derived, so revealing this leaf's nonce says nothing
//! about any other leaf.

use serde::{Deserialize, Serialize};
use shared_crypto::Hash;

use super::errors::DisclosureError;
use super::value_objects::{Component, Nonce, ProofNode, TreeDigests};
use crate::algorithms::{path_index, root_from_path};

/// Proof that one component belongs to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDisclosure {
    /// Group ordinal.
    pub group_index: u32,
    /// Position within the group.
    pub component_index: u32,
    /// Serialized component.
    pub component: Component,
    /// Its nonce.
    pub nonce: Nonce,
    /// Leaf up to the group root.
    pub group_path: Vec<ProofNode>,
    /// Group root up to the id.
    pub top_path: Vec<ProofNode>,
}

impl ComponentDisclosure {
    /// Verify inclusion under `tx_id`.
    ///
    /// The sibling positions of each path must spell out the claimed index.
    pub fn verify(&self, tx_id: &Hash, digests: TreeDigests) -> Result<(), DisclosureError> {
        if path_index(&self.group_path) != u64::from(self.component_index) {
            return Err(DisclosureError::MalformedDisclosure(format!(
                "group path does not lead to component {}",
                self.component_index
            )));
        }
        if path_index(&self.top_path) != u64::from(self.group_index) {
            return Err(DisclosureError::MalformedDisclosure(format!(
                "top path does not lead to group {}",
                self.group_index
            )));
        }

        let leaf = digests.hash_leaf(&self.nonce, &self.component);
        let group_root = root_from_path(&leaf, &self.group_path, digests.node);
        let computed = root_from_path(&group_root, &self.top_path, digests.node);
        if computed != *tx_id {
            tracing::warn!(
                group = self.group_index,
                index = self.component_index,
                "component disclosure does not match transaction"
            );
            return Err(DisclosureError::HashMismatch {
                context: format!(
                    "component {} of group {}",
                    self.component_index, self.group_index
                ),
                expected: *tx_id,
                computed,
            });
        }
        Ok(())
    }
}
