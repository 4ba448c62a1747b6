//! # IPC Payloads
//!
//! Payloads exchanged with the messaging layer.
//!
//! ## Ordering
//!
//! Every sequence travels in prover order. Leaf order determines group roots,
//! so payloads are never sorted or deduplicated in transit.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DisclosureError, PartialTransactionView, TransactionDisclosure, UtxoCommitment,
};

/// A transaction sent to a verifier, with commitments for the states it
/// consumes or references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialTransactionPayload {
    /// Disclosed groups, inherited roots, output hashes and id.
    pub disclosure: TransactionDisclosure,
    /// One commitment per real input or reference.
    pub input_commitments: Vec<UtxoCommitment>,
}

impl TryFrom<PartialTransactionPayload> for PartialTransactionView {
    type Error = DisclosureError;

    /// Reconstruct and verify. Commitments are not checked here.
    fn try_from(payload: PartialTransactionPayload) -> Result<Self, Self::Error> {
        let view = PartialTransactionView::reconstruct(payload.disclosure)?;
        view.verify()?;
        Ok(view)
    }
}
