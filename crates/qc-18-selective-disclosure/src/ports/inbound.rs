//! # Inbound Ports (Driving Ports)
//!
//! Public API exposed by the Selective Disclosure subsystem.

use crate::domain::{
    DisclosureError, FullTransactionView, PartialTransactionView, PrivacySalt, TransactionBody,
    TransactionDisclosure, UtxoCommitment,
};
use crate::ipc::PartialTransactionPayload;

/// Primary API for the Selective Disclosure subsystem.
pub trait SelectiveDisclosureApi {
    /// Build the prover's view of a transaction.
    ///
    /// Uses the configured padding and digest pair.
    fn build_transaction(
        &self,
        body: &TransactionBody,
        salt: PrivacySalt,
    ) -> Result<FullTransactionView, DisclosureError>;

    /// Package a transaction for a verifier, with commitments for the states
    /// it spends or references.
    fn disclose(
        &self,
        view: &FullTransactionView,
        input_commitments: Vec<UtxoCommitment>,
    ) -> PartialTransactionPayload;

    /// Reconstruct a partial view and check it is fit for validation.
    ///
    /// ## Errors
    ///
    /// - `MalformedDisclosure`: inconsistent disclosure structure
    /// - `HashMismatch`: recomputed roots differ from the issued ones
    /// - `DisclosureInvariant`: a mandatory group was withheld
    fn verify_partial(
        &self,
        disclosure: TransactionDisclosure,
    ) -> Result<PartialTransactionView, DisclosureError>;

    /// Verify one commitment against the transaction that produced it.
    fn verify_utxo(&self, commitment: &UtxoCommitment) -> Result<(), DisclosureError>;

    /// Require a verified commitment behind every real input and reference.
    fn verify_inputs(
        &self,
        view: &PartialTransactionView,
        commitments: &[UtxoCommitment],
    ) -> Result<(), DisclosureError>;
}
