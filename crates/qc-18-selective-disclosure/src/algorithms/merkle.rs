//! # Merkle Root and Paths
//!
//! Binary Merkle tree over an ordered list of hashes.
//!
//! # Algorithm
//!
//! 1. Empty list: root is [`SENTINEL_HASH`]
//! 2. Single element: root is that element
//! 3. Otherwise pair neighbours level by level: parent = `node(left || right)`
//! 4. An unpaired node at the end of an odd-length level is paired with
//!    [`SENTINEL_HASH`], never with itself. Duplicating the last node would let
//!    `[a, b, c]` and `[a, b, c, c]` share a root.

use shared_crypto::{DigestAlgorithm, Hash};

use crate::domain::{ProofNode, SiblingPosition, SENTINEL_HASH};

/// Merkle root of `leaves` under `node_digest`.
pub fn merkle_root(leaves: &[Hash], node_digest: DigestAlgorithm) -> Hash {
    if leaves.is_empty() {
        return SENTINEL_HASH;
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level, node_digest);
    }
    level[0]
}

/// Hash one level into its parent level.
fn next_level(level: &[Hash], node_digest: DigestAlgorithm) -> Vec<Hash> {
    level
        .chunks(2)
        .map(|pair| {
            let right = pair.get(1).unwrap_or(&SENTINEL_HASH);
            node_digest.hash_pair(&pair[0], right)
        })
        .collect()
}

/// Sibling path from leaf `index` up to the root.
///
/// Returns `None` if `index` is out of range. A single-leaf tree has an
/// empty path.
pub fn merkle_path(
    leaves: &[Hash],
    index: usize,
    node_digest: DigestAlgorithm,
) -> Option<Vec<ProofNode>> {
    if index >= leaves.len() {
        return None;
    }

    let mut path = Vec::new();
    let mut level = leaves.to_vec();
    let mut current = index;

    while level.len() > 1 {
        let node = if current % 2 == 0 {
            ProofNode::right(level.get(current + 1).copied().unwrap_or(SENTINEL_HASH))
        } else {
            ProofNode::left(level[current - 1])
        };
        path.push(node);

        level = next_level(&level, node_digest);
        current /= 2;
    }

    Some(path)
}

/// Fold a leaf through its path.
pub fn root_from_path(leaf: &Hash, path: &[ProofNode], node_digest: DigestAlgorithm) -> Hash {
    path.iter().fold(*leaf, |current, node| match node.position {
        SiblingPosition::Left => node_digest.hash_pair(&node.hash, &current),
        SiblingPosition::Right => node_digest.hash_pair(&current, &node.hash),
    })
}

/// Leaf position encoded by a path's sibling positions.
///
/// A left sibling at depth `d` means the running node was a right child,
/// i.e. bit `d` of the index is set.
pub fn path_index(path: &[ProofNode]) -> u64 {
    path.iter()
        .enumerate()
        .filter(|(_, node)| node.position == SiblingPosition::Left)
        .fold(0u64, |index, (depth, _)| index | (1u64 << depth))
}

/// Verify that `leaf` sits under `expected_root`.
pub fn verify_merkle_path(
    leaf: &Hash,
    path: &[ProofNode],
    expected_root: &Hash,
    node_digest: DigestAlgorithm,
) -> bool {
    root_from_path(leaf, path, node_digest) == *expected_root
}
