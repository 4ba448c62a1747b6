//! # Component Merkle Tree
//!
//! Turns ordered component groups, a privacy salt and a digest pair into
//! nonces, leaf hashes, group roots and the top root.
//!
//! ```text
//!                         TopRoot (= transaction id)
//!                        /                          \
//!              ...                                     ...
//!         /          \                            /           \
//!   GroupRoot(0)  GroupRoot(1)   ...   GroupRoot(7)  GroupRoot(8)
//!      /   \
//!  leaf_0  leaf_1      leaf_i = leaf_digest(nonce_i || component_i)
//! ```
//!
//! The top-level list spans every known ordinal (and any higher ordinal
//! present). Absent groups contribute [`SENTINEL_HASH`]. All values are
//! computed once at construction and never change.

use std::collections::BTreeMap;

use shared_crypto::Hash;

use super::merkle::merkle_root;
use super::nonce::derive_group_nonces;
use crate::domain::{
    ComponentGroups, Nonce, PrivacySalt, TreeDigests, KNOWN_GROUP_COUNT, SENTINEL_HASH,
};

/// Derived hashes of one fully known transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMerkleTree {
    digests: TreeDigests,
    nonces: BTreeMap<u32, Vec<Nonce>>,
    leaf_hashes: BTreeMap<u32, Vec<Hash>>,
    group_roots: BTreeMap<u32, Hash>,
    top_level_roots: Vec<Hash>,
    root: Hash,
}

impl ComponentMerkleTree {
    /// Build the tree. Never fails: an empty grouping hashes to a root made of
    /// sentinels only.
    pub fn build(groups: &ComponentGroups, salt: &PrivacySalt, digests: TreeDigests) -> Self {
        let mut nonces = BTreeMap::new();
        let mut leaf_hashes = BTreeMap::new();
        let mut group_roots = BTreeMap::new();

        for group in groups.iter() {
            let group_nonces = derive_group_nonces(
                salt,
                group.group_index,
                group.components.len(),
                digests.leaf,
            );
            let leaves: Vec<Hash> = group_nonces
                .iter()
                .zip(&group.components)
                .map(|(nonce, component)| digests.hash_leaf(nonce, component))
                .collect();

            group_roots.insert(group.group_index, merkle_root(&leaves, digests.node));
            nonces.insert(group.group_index, group_nonces);
            leaf_hashes.insert(group.group_index, leaves);
        }

        let top_level_roots = top_level_list(&group_roots);
        let root = merkle_root(&top_level_roots, digests.node);

        tracing::debug!(
            groups = groups.len(),
            top_level_len = top_level_roots.len(),
            root = %hex::encode(&root[..8]),
            "component merkle tree built"
        );

        Self {
            digests,
            nonces,
            leaf_hashes,
            group_roots,
            top_level_roots,
            root,
        }
    }

    /// Top root, the transaction id.
    pub fn root(&self) -> Hash {
        self.root
    }

    /// Digest pair used.
    pub fn digests(&self) -> TreeDigests {
        self.digests
    }

    /// Roots of present groups by ordinal.
    pub fn group_roots(&self) -> &BTreeMap<u32, Hash> {
        &self.group_roots
    }

    /// Root of one group, sentinel if absent.
    pub fn group_root(&self, group_index: u32) -> Hash {
        self.group_roots
            .get(&group_index)
            .copied()
            .unwrap_or(SENTINEL_HASH)
    }

    /// Sentinel-filled ordered list the top root is computed over.
    pub fn top_level_roots(&self) -> &[Hash] {
        &self.top_level_roots
    }

    /// Nonces of present groups by ordinal.
    pub fn nonces(&self) -> &BTreeMap<u32, Vec<Nonce>> {
        &self.nonces
    }

    /// Leaf hashes of one group, empty if absent.
    pub fn leaf_hashes(&self, group_index: u32) -> &[Hash] {
        self.leaf_hashes
            .get(&group_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Ordered group roots spanning `0..max(KNOWN_GROUP_COUNT, highest + 1)`.
pub fn top_level_list(group_roots: &BTreeMap<u32, Hash>) -> Vec<Hash> {
    let span = group_roots
        .keys()
        .next_back()
        .map(|highest| highest + 1)
        .unwrap_or(0)
        .max(KNOWN_GROUP_COUNT);

    (0..span)
        .map(|index| group_roots.get(&index).copied().unwrap_or(SENTINEL_HASH))
        .collect()
}
