//! # Algorithms Module
//!
//! Pure hashing algorithms: nonce derivation, Merkle roots and paths, and the
//! component tree built from them.

pub mod merkle;
pub mod nonce;
pub mod tree;

pub use merkle::{merkle_path, merkle_root, path_index, root_from_path, verify_merkle_path};
pub use nonce::{derive_group_nonces, derive_nonce};
pub use tree::{top_level_list, ComponentMerkleTree};
