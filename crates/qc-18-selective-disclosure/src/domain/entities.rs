//! # Domain Entities
//!
//! The prover's logical transaction, before it is rendered to components.

use serde::{Deserialize, Serialize};
use shared_crypto::Hash;

use super::errors::DisclosureError;

/// Serialized public key.
pub type PublicKey = Vec<u8>;

/// Pointer to one output of a prior transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateRef {
    /// Id (top root) of the transaction that produced the state.
    pub tx_id: Hash,
    /// Output position in that transaction's outputs group.
    pub index: u32,
}

impl StateRef {
    /// Create a state reference.
    pub fn new(tx_id: Hash, index: u32) -> Self {
        Self { tx_id, index }
    }
}

/// A produced state.
///
/// `discriminant` is the explicit, stable type tag assigned when the state
/// is serialized. Outputs are grouped in discriminant order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputState {
    /// Stable type tag.
    pub discriminant: u32,
    /// Serialized state body.
    pub data: Vec<u8>,
}

/// Command data plus the keys that must sign for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Stable type tag.
    pub discriminant: u32,
    /// Serialized command value.
    pub data: Vec<u8>,
    /// Keys required to sign.
    pub signers: Vec<PublicKey>,
}

/// Notary identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Human readable name.
    pub name: String,
    /// Notary signing key.
    pub owning_key: PublicKey,
}

/// Validity interval in seconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub from: Option<u64>,
    /// Exclusive upper bound.
    pub until: Option<u64>,
}

impl TimeWindow {
    /// Window bounded on both sides.
    pub fn between(from: u64, until: u64) -> Result<Self, DisclosureError> {
        let window = Self {
            from: Some(from),
            until: Some(until),
        };
        window.validate()?;
        Ok(window)
    }

    /// Check that at least one bound is set and bounds are ordered.
    pub fn validate(&self) -> Result<(), DisclosureError> {
        match (self.from, self.until) {
            (None, None) => Err(DisclosureError::Configuration(
                "time window needs at least one bound".to_string(),
            )),
            (Some(from), Some(until)) if from >= until => Err(DisclosureError::Configuration(
                format!("time window start {} is not before end {}", from, until),
            )),
            _ => Ok(()),
        }
    }
}

/// A transaction as assembled by the prover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    /// Consumed states.
    pub inputs: Vec<StateRef>,
    /// Produced states.
    pub outputs: Vec<OutputState>,
    /// Read-only referenced states.
    pub references: Vec<StateRef>,
    /// Commands (exactly one is supported).
    pub commands: Vec<Command>,
    /// Attachment hashes.
    pub attachments: Vec<Hash>,
    /// Notary (required).
    pub notary: Option<Party>,
    /// Optional validity window.
    pub time_window: Option<TimeWindow>,
    /// Optional network parameters hash.
    pub parameters_hash: Option<Hash>,
}

impl TransactionBody {
    /// The single command and notary this subsystem requires.
    ///
    /// Multi-command transactions are rejected to keep the witness shape fixed.
    pub fn validate_shape(&self) -> Result<(&Command, &Party), DisclosureError> {
        let command = match self.commands.as_slice() {
            [command] => command,
            other => {
                return Err(DisclosureError::Configuration(format!(
                    "exactly one command required, got {}",
                    other.len()
                )))
            }
        };
        let notary = self.notary.as_ref().ok_or_else(|| {
            DisclosureError::Configuration("notary is required".to_string())
        })?;
        if let Some(window) = &self.time_window {
            window.validate()?;
        }
        Ok((command, notary))
    }
}
