//! # Disclosure Service
//!
//! Application service tying configuration, serialization and transaction
//! storage to the domain views.
//!
//! ## Accepting a Transaction
//!
//! 1. Reconstruct the partial view and verify it against its id
//! 2. Require every mandatory group to be disclosed
//! 3. Require padded groups to carry exactly their padded size
//! 4. Require a verified UTXO commitment behind every real input and reference

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapters::BincodeComponentSerializer;
use crate::config::DisclosureConfig;
use crate::domain::{
    Component, ComponentGroupKind, ComponentPadding, DisclosureError, FullTransactionView,
    PartialTransactionView, PrivacySalt, TransactionBody, TransactionDisclosure, UtxoCommitment,
};
use crate::ipc::PartialTransactionPayload;
use crate::ports::{
    ComponentSerializer, SelectiveDisclosureApi, TransactionComponent, TransactionStorage,
};

/// Selective Disclosure Service - builds and verifies transaction views.
pub struct DisclosureService<S, Z = BincodeComponentSerializer>
where
    S: TransactionStorage,
    Z: ComponentSerializer,
{
    /// Configuration.
    config: DisclosureConfig,
    /// Validated padding.
    padding: ComponentPadding,
    /// Prior transaction lookup.
    storage: Arc<S>,
    /// Field serializer.
    serializer: Z,
    /// Serialized input filler, skipped by input checks.
    input_filler: Component,
    /// Serialized reference filler, skipped by reference checks.
    reference_filler: Component,
}

impl<S: TransactionStorage> DisclosureService<S> {
    /// Create a service with the bincode serializer.
    pub fn new(config: DisclosureConfig, storage: Arc<S>) -> Result<Self, DisclosureError> {
        Self::with_serializer(config, storage, BincodeComponentSerializer)
    }
}

impl<S, Z> DisclosureService<S, Z>
where
    S: TransactionStorage,
    Z: ComponentSerializer,
{
    /// Create a service with a custom serializer.
    ///
    /// Fails with `Configuration` if the padding declaration is incomplete.
    pub fn with_serializer(
        config: DisclosureConfig,
        storage: Arc<S>,
        serializer: Z,
    ) -> Result<Self, DisclosureError> {
        let digests = config.digests();
        if !digests.is_separated() {
            return Err(DisclosureError::Configuration(format!(
                "leaf and node digest must differ, both are {}",
                digests.leaf
            )));
        }
        let padding = config.component_padding()?;
        let input_filler =
            serializer.serialize(TransactionComponent::StateRef(padding.input_filler()))?;
        let reference_filler =
            serializer.serialize(TransactionComponent::StateRef(padding.reference_filler()))?;
        Ok(Self {
            config,
            padding,
            storage,
            serializer,
            input_filler,
            reference_filler,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Validated padding.
    pub fn padding(&self) -> &ComponentPadding {
        &self.padding
    }

    /// Verify a received transaction end to end.
    pub fn accept_transaction(
        &self,
        payload: PartialTransactionPayload,
    ) -> Result<PartialTransactionView, DisclosureError> {
        let PartialTransactionPayload {
            disclosure,
            input_commitments,
        } = payload;

        let view = self.verify_partial(disclosure)?;
        self.verify_inputs(&view, &input_commitments)?;

        info!(
            tx = %hex::encode(&view.id()[..8]),
            commitments = input_commitments.len(),
            "transaction accepted"
        );
        Ok(view)
    }

    fn filler(&self, kind: ComponentGroupKind) -> &Component {
        match kind {
            ComponentGroupKind::References => &self.reference_filler,
            _ => &self.input_filler,
        }
    }
}

impl<S, Z> SelectiveDisclosureApi for DisclosureService<S, Z>
where
    S: TransactionStorage,
    Z: ComponentSerializer,
{
    fn build_transaction(
        &self,
        body: &TransactionBody,
        salt: PrivacySalt,
    ) -> Result<FullTransactionView, DisclosureError> {
        FullTransactionView::build(
            body,
            &self.padding,
            salt,
            self.config.digests(),
            &self.serializer,
        )
    }

    fn disclose(
        &self,
        view: &FullTransactionView,
        input_commitments: Vec<UtxoCommitment>,
    ) -> PartialTransactionPayload {
        PartialTransactionPayload {
            disclosure: view.disclosure(),
            input_commitments,
        }
    }

    fn verify_partial(
        &self,
        disclosure: TransactionDisclosure,
    ) -> Result<PartialTransactionView, DisclosureError> {
        let view = PartialTransactionView::reconstruct(disclosure)?;
        view.verify_for_validation()?;
        view.verify_cardinality(&self.padding)?;
        info!(tx = %hex::encode(&view.id()[..8]), "partial view verified");
        Ok(view)
    }

    fn verify_utxo(&self, commitment: &UtxoCommitment) -> Result<(), DisclosureError> {
        commitment.verify(self.storage.as_ref())
    }

    fn verify_inputs(
        &self,
        view: &PartialTransactionView,
        commitments: &[UtxoCommitment],
    ) -> Result<(), DisclosureError> {
        let keyed = commitments
            .iter()
            .map(|commitment| -> Result<(Component, &UtxoCommitment), DisclosureError> {
                let key = self
                    .serializer
                    .serialize(TransactionComponent::StateRef(&commitment.state_ref))?;
                Ok((key, commitment))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for kind in [ComponentGroupKind::Inputs, ComponentGroupKind::References] {
            let components = view
                .disclosed_components(kind)
                .ok_or(DisclosureError::DisclosureInvariant { group: kind })?;
            let filler = self.filler(kind);

            for (index, component) in components.iter().enumerate() {
                if component == filler {
                    continue;
                }
                let Some((_, commitment)) = keyed.iter().find(|(key, _)| key == component)
                else {
                    warn!(group = %kind, index, "no commitment for disclosed state");
                    return Err(DisclosureError::UnprovenState { group: kind, index });
                };
                commitment.verify(self.storage.as_ref())?;
            }
        }

        info!(
            tx = %hex::encode(&view.id()[..8]),
            "inputs and references proven"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTransactionStore;
    use crate::domain::{Command, OutputState, Party, StateRef};

    fn command() -> Command {
        Command {
            discriminant: 1,
            data: b"move".to_vec(),
            signers: vec![vec![0xB0; 32]],
        }
    }

    fn notary() -> Party {
        Party {
            name: "Notary".to_string(),
            owning_key: vec![0xA0; 32],
        }
    }

    fn issuance() -> TransactionBody {
        TransactionBody {
            outputs: vec![
                OutputState {
                    discriminant: 1,
                    data: b"cash:100".to_vec(),
                },
                OutputState {
                    discriminant: 1,
                    data: b"cash:50".to_vec(),
                },
            ],
            commands: vec![command()],
            notary: Some(notary()),
            ..Default::default()
        }
    }

    fn spend(inputs: Vec<StateRef>, references: Vec<StateRef>) -> TransactionBody {
        TransactionBody {
            inputs,
            references,
            outputs: vec![OutputState {
                discriminant: 1,
                data: b"cash:100:bob".to_vec(),
            }],
            commands: vec![command()],
            notary: Some(notary()),
            ..Default::default()
        }
    }

    struct Harness {
        store: Arc<InMemoryTransactionStore>,
        service: DisclosureService<InMemoryTransactionStore>,
        prior: FullTransactionView,
    }

    fn harness() -> Harness {
        let store = Arc::new(InMemoryTransactionStore::new(16));
        let service =
            DisclosureService::new(DisclosureConfig::for_testing(), store.clone()).unwrap();
        let prior = service
            .build_transaction(&issuance(), PrivacySalt::random())
            .unwrap();
        store.insert(prior.to_partial().unwrap());
        Harness {
            store,
            service,
            prior,
        }
    }

    #[test]
    fn test_accept_spend_with_commitment() {
        let h = harness();
        let body = spend(vec![StateRef::new(h.prior.id(), 0)], vec![]);
        let tx = h.service.build_transaction(&body, PrivacySalt::random()).unwrap();
        let payload = h.service.disclose(&tx, vec![h.prior.utxo_commitment(0).unwrap()]);

        let view = h.service.accept_transaction(payload).unwrap();
        assert_eq!(view.id(), tx.id());
    }

    #[test]
    fn test_reference_needs_commitment() {
        let h = harness();
        let body = spend(
            vec![StateRef::new(h.prior.id(), 0)],
            vec![StateRef::new(h.prior.id(), 1)],
        );
        let tx = h.service.build_transaction(&body, PrivacySalt::random()).unwrap();

        let partial = h.service.disclose(&tx, vec![h.prior.utxo_commitment(0).unwrap()]);
        assert_eq!(
            h.service.accept_transaction(partial).unwrap_err(),
            DisclosureError::UnprovenState {
                group: ComponentGroupKind::References,
                index: 0,
            }
        );

        let complete = h.service.disclose(
            &tx,
            vec![
                h.prior.utxo_commitment(1).unwrap(),
                h.prior.utxo_commitment(0).unwrap(),
            ],
        );
        assert!(h.service.accept_transaction(complete).is_ok());
    }

    #[test]
    fn test_missing_commitment_is_unproven() {
        let h = harness();
        let body = spend(vec![StateRef::new(h.prior.id(), 0)], vec![]);
        let tx = h.service.build_transaction(&body, PrivacySalt::random()).unwrap();
        let payload = h.service.disclose(&tx, vec![h.prior.utxo_commitment(1).unwrap()]);
        assert_eq!(
            h.service.accept_transaction(payload).unwrap_err(),
            DisclosureError::UnprovenState {
                group: ComponentGroupKind::Inputs,
                index: 0,
            }
        );
    }

    #[test]
    fn test_forged_commitment_content() {
        let h = harness();
        let body = spend(vec![StateRef::new(h.prior.id(), 0)], vec![]);
        let tx = h.service.build_transaction(&body, PrivacySalt::random()).unwrap();
        let mut commitment = h.prior.utxo_commitment(0).unwrap();
        commitment.serialized_content = h.prior.utxo_commitment(1).unwrap().serialized_content;

        let payload = h.service.disclose(&tx, vec![commitment]);
        assert!(matches!(
            h.service.accept_transaction(payload),
            Err(DisclosureError::HashMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_prior_transaction() {
        let h = harness();
        let unknown = h
            .service
            .build_transaction(&issuance(), PrivacySalt::random())
            .unwrap();
        let body = spend(vec![StateRef::new(unknown.id(), 0)], vec![]);
        let tx = h.service.build_transaction(&body, PrivacySalt::random()).unwrap();
        let payload = h.service.disclose(&tx, vec![unknown.utxo_commitment(0).unwrap()]);
        assert_eq!(
            h.service.accept_transaction(payload).unwrap_err(),
            DisclosureError::TransactionResolution { tx_id: unknown.id() }
        );
    }

    #[test]
    fn test_verify_utxo_through_service() {
        let h = harness();
        assert!(h.store.contains(&h.prior.id()));
        h.service
            .verify_utxo(&h.prior.utxo_commitment(1).unwrap())
            .unwrap();
    }

    #[test]
    fn test_incomplete_padding_config_rejected() {
        let mut config = DisclosureConfig::default();
        config.padding.inputs_size = None;
        let store = Arc::new(InMemoryTransactionStore::new(1));
        assert!(matches!(
            DisclosureService::new(config, store),
            Err(DisclosureError::Configuration(_))
        ));
    }

    #[test]
    fn test_equal_digests_config_rejected() {
        let mut config = DisclosureConfig::for_testing();
        config.node_digest = config.leaf_digest;
        let store = Arc::new(InMemoryTransactionStore::new(1));
        assert!(matches!(
            DisclosureService::new(config, store),
            Err(DisclosureError::Configuration(_))
        ));
    }

    #[test]
    fn test_verify_partial_checks_padded_outputs() {
        let h = harness();
        assert!(h.service.verify_partial(h.prior.disclosure()).is_ok());

        let digests = h.prior.digests();
        let mut disclosure = h.prior.disclosure();
        let leaves = disclosure.output_leaf_hashes.clone();
        disclosure.output_leaf_hashes = vec![
            digests.hash_node(&leaves[0], &leaves[1]),
            digests.hash_node(&leaves[2], &leaves[3]),
        ];
        assert!(matches!(
            h.service.verify_partial(disclosure),
            Err(DisclosureError::MalformedDisclosure(_))
        ));
    }

    #[test]
    fn test_build_uses_configured_padding() {
        let h = harness();
        let tx = h
            .service
            .build_transaction(&issuance(), PrivacySalt::random())
            .unwrap();
        assert_eq!(
            tx.output_leaf_hashes().len(),
            h.service.padding().target(ComponentGroupKind::Outputs).unwrap()
        );
        assert_eq!(tx.digests(), h.service.config().digests());
    }
}
