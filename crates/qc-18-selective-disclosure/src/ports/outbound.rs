//! # Outbound Ports (Driven Ports)
//!
//! SPIs required by the Selective Disclosure subsystem.
//!
//! - `TransactionStorage`: resolves prior transactions during cross-transaction
//!   verification. The only call that may block or fail on I/O; retry and
//!   timeout policy belong to the implementation.
//! - `ComponentSerializer`: renders transaction fields to component bytes.

use shared_crypto::Hash;

use crate::domain::{
    Command, Component, DisclosureError, OutputState, Party, PublicKey, StateRef, TimeWindow,
    TransactionCommitment,
};

/// Abstract interface for resolving transactions by id.
///
/// This subsystem never persists state; it only reads through this port.
pub trait TransactionStorage: Send + Sync {
    /// Get a transaction view by its id. `Ok(None)` when unknown.
    fn get_transaction(&self, id: &Hash) -> Result<Option<TransactionCommitment>, StoreError>;
}

/// One transaction field handed to the serializer.
#[derive(Debug, Clone, Copy)]
pub enum TransactionComponent<'a> {
    /// Input or reference pointer.
    StateRef(&'a StateRef),
    /// Produced state.
    Output(&'a OutputState),
    /// Command value. Its signers are serialized separately.
    Command(&'a Command),
    /// Attachment hash.
    Attachment(&'a Hash),
    /// Notary party.
    Notary(&'a Party),
    /// Validity window.
    TimeWindow(&'a TimeWindow),
    /// Network parameters hash.
    ParametersHash(&'a Hash),
    /// Required signing key.
    Signer(&'a PublicKey),
}

/// Abstract interface for component serialization.
///
/// ## Canonical Serialization
///
/// MUST produce identical bytes for semantically identical components, since
/// leaf hashes and the transaction id are computed over these bytes.
pub trait ComponentSerializer: Send + Sync {
    /// Serialize one component to canonical bytes.
    fn serialize(&self, component: TransactionComponent<'_>)
        -> Result<Component, SerializationError>;
}

/// Storage operation errors.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Backend I/O failure.
    IOError {
        /// Backend message
        message: String,
    },
    /// Stored record could not be decoded.
    SerializationError {
        /// Decoder message
        message: String,
    },
    /// Backend lock or connection unavailable.
    Unavailable,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IOError { message } => write!(f, "I/O error: {}", message),
            Self::SerializationError { message } => write!(f, "Serialization error: {}", message),
            Self::Unavailable => write!(f, "Storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for DisclosureError {
    fn from(err: StoreError) -> Self {
        DisclosureError::Storage(err.to_string())
    }
}

/// Serialization errors.
#[derive(Debug, Clone)]
pub struct SerializationError {
    /// What failed.
    pub message: String,
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Serialization error: {}", self.message)
    }
}

impl std::error::Error for SerializationError {}

impl From<SerializationError> for DisclosureError {
    fn from(err: SerializationError) -> Self {
        DisclosureError::Serialization(err.message)
    }
}
