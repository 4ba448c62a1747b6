//! # Domain Errors
//!
//! Error types for Selective Disclosure.
//!
//! Every variant aborts the current build or verify operation. Nothing is
//! retried or recovered inside the subsystem: a transaction is either fully
//! valid or rejected.

use shared_crypto::Hash;
use thiserror::Error;

use super::value_objects::ComponentGroupKind;

/// Selective disclosure error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisclosureError {
    /// Malformed construction input (padding spec, salt, command/notary shape).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A group holds more real components than its padding target.
    #[error("Group {group} holds {actual} components, padding target is {target}")]
    GroupCardinality {
        /// Offending group
        group: ComponentGroupKind,
        /// Components supplied
        actual: usize,
        /// Declared padding target
        target: usize,
    },

    /// A recomputed root or leaf differs from the value it must equal.
    #[error("Hash mismatch ({context}): expected {}, computed {}", short_hex(.expected), short_hex(.computed))]
    HashMismatch {
        /// What was being compared
        context: String,
        /// Value the prover issued or the prior transaction recorded
        expected: Hash,
        /// Value recomputed locally
        computed: Hash,
    },

    /// Referenced prior transaction is not available from storage.
    #[error("Transaction not found: {}", short_hex(.tx_id))]
    TransactionResolution {
        /// Requested transaction id
        tx_id: Hash,
    },

    /// A group verification depends on was not disclosed.
    #[error("Group {group} must be disclosed for verification")]
    DisclosureInvariant {
        /// Group presented only as an inherited root
        group: ComponentGroupKind,
    },

    /// Disclosure parts are structurally inconsistent.
    #[error("Malformed disclosure: {0}")]
    MalformedDisclosure(String),

    /// Requested component position does not exist.
    #[error("Component {index} not found in group {group}")]
    ComponentNotFound {
        /// Group ordinal
        group: u32,
        /// Position within the group
        index: usize,
    },

    /// Prior transaction has no output at the claimed index.
    #[error("Output {index} not found in transaction {}", short_hex(.tx_id))]
    OutputNotFound {
        /// Prior transaction id
        tx_id: Hash,
        /// Claimed output index
        index: u32,
    },

    /// A disclosed input or reference has no UTXO commitment backing it.
    #[error("No UTXO commitment for {group} component {index}")]
    UnprovenState {
        /// Inputs or references
        group: ComponentGroupKind,
        /// Position within the group
        index: usize,
    },

    /// Component serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Transaction storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// First eight bytes of a hash as hex, for messages.
pub(crate) fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..8])
}
