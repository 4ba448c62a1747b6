//! # QC-18 Selective Disclosure
//!
//! Merkle commitments over grouped transaction components, letting each party
//! see only the parts of a transaction it is entitled to while still checking
//! that the whole transaction is consistent and correctly chained.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Commitment Structure
//!
//! ```text
//! TransactionBody ──serialize──→ ComponentGroups (by role ordinal, padded)
//!                                        │
//!                 PrivacySalt ──→ nonce(salt, group, index)
//!                                        │
//!                        leaf = leaf_digest(nonce || component)
//!                                        │
//!                          GroupRoot = MerkleRoot(leaves)
//!                                        │
//!              id = MerkleRoot([GroupRoot(0) .. GroupRoot(8)], sentinel-filled)
//! ```
//!
//! ## Views
//!
//! | View | Holder | Contents |
//! |------|--------|----------|
//! | `FullTransactionView` | prover | every plaintext group, salt, full tree |
//! | `PartialTransactionView` | verifier | disclosed groups, hidden roots, output leaf hashes |
//! | `UtxoCommitment` | state holder | one output's content and nonce |
//!
//! A partial view is accepted only if its recomputed top root equals the id.
//! A `UtxoCommitment` is accepted only if its leaf equals the output leaf hash
//! recorded by the producing transaction.
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-selective-disclosure/
//! ├── domain/          # Groups, padding, views, commitments, errors
//! ├── algorithms/      # Nonce derivation, Merkle roots/paths, component tree
//! ├── ports/           # API trait (inbound) + storage/serializer traits (outbound)
//! ├── adapters/        # Bincode serializer, in-memory LRU transaction store
//! ├── ipc/             # Wire payloads
//! ├── application/     # DisclosureService
//! └── config.rs        # DisclosureConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod ports;

// Re-exports
pub use adapters::{BincodeComponentSerializer, InMemoryTransactionStore};
pub use algorithms::{
    derive_nonce, merkle_path, merkle_root, top_level_list, verify_merkle_path,
    ComponentMerkleTree,
};
pub use application::DisclosureService;
pub use config::DisclosureConfig;
pub use domain::{
    Command, Component, ComponentDisclosure, ComponentGroup, ComponentGroupKind,
    ComponentGroups, ComponentPadding, ComponentPaddingBuilder, DisclosureError,
    FullTransactionView, GroupVisibility, Nonce, OutputState, Party, PartialTransactionView,
    PrivacySalt, PublicKey, StateRef, TimeWindow, TransactionBody, TransactionCommitment,
    TransactionDisclosure, TreeDigests, TypedComponent, UtxoCommitment, KNOWN_GROUP_COUNT,
    SENTINEL_HASH,
};
pub use ipc::PartialTransactionPayload;
pub use ports::{
    ComponentSerializer, SelectiveDisclosureApi, SerializationError, StoreError,
    TransactionComponent, TransactionStorage,
};
pub use shared_crypto::{DigestAlgorithm, Hash};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
