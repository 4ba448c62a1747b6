//! # Selective Disclosure Flows
//!
//! Chains of private transactions settled through `DisclosureService`.
//!
//! ## Flow Tested
//!
//! 1. **Prover**: builds a `FullTransactionView`, attaches UTXO commitments
//!    for the states it spends or references
//! 2. **Transport**: the payload crosses the wire as JSON
//! 3. **Verifier**: reconstructs the partial view, checks it against its id,
//!    proves every input against storage, then records the partial view
//!
//! The verifier's store only ever holds partial views, so every later hop is
//! checked against output leaf hashes alone.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use qc_18_selective_disclosure::{
        Command, ComponentGroupKind, DisclosureConfig, DisclosureError, DisclosureService,
        FullTransactionView, InMemoryTransactionStore, OutputState, PartialTransactionPayload,
        Party, PrivacySalt, SelectiveDisclosureApi, StateRef, TimeWindow, TransactionBody,
        TransactionStorage, UtxoCommitment,
    };
    use shared_crypto::DigestAlgorithm;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn key(owner: u8) -> Vec<u8> {
        vec![owner; 32]
    }

    fn cash(owner: u8, amount: u32) -> OutputState {
        let mut data = amount.to_be_bytes().to_vec();
        data.extend_from_slice(&key(owner));
        OutputState {
            discriminant: 1,
            data,
        }
    }

    fn body(inputs: Vec<StateRef>, outputs: Vec<OutputState>, signer: u8) -> TransactionBody {
        TransactionBody {
            inputs,
            outputs,
            commands: vec![Command {
                discriminant: 1,
                data: b"move".to_vec(),
                signers: vec![key(signer)],
            }],
            notary: Some(Party {
                name: "O=Notary, L=London, C=GB".to_string(),
                owning_key: key(0xAA),
            }),
            time_window: Some(TimeWindow::between(1_700_000_000, 1_700_003_600).unwrap()),
            parameters_hash: Some([0x5E; 32]),
            ..Default::default()
        }
    }

    /// A verifier node: its store only ever sees partial views.
    struct Ledger {
        store: Arc<InMemoryTransactionStore>,
        service: DisclosureService<InMemoryTransactionStore>,
    }

    impl Ledger {
        fn new(config: DisclosureConfig) -> Self {
            init_tracing();
            let store = Arc::new(InMemoryTransactionStore::new(config.store_capacity));
            let service = DisclosureService::new(config, store.clone()).unwrap();
            Self { store, service }
        }

        /// Build as prover, ship as JSON, accept and record as verifier.
        fn settle(
            &self,
            body: &TransactionBody,
            commitments: Vec<UtxoCommitment>,
        ) -> Result<FullTransactionView, DisclosureError> {
            let tx = self.service.build_transaction(body, PrivacySalt::random())?;
            let payload = self.service.disclose(&tx, commitments);

            let wire = serde_json::to_vec(&payload).unwrap();
            let received: PartialTransactionPayload = serde_json::from_slice(&wire).unwrap();

            let view = self.service.accept_transaction(received)?;
            self.store.insert(view);
            Ok(tx)
        }
    }

    // =============================================================================
    // MULTI-HOP CHAINS
    // =============================================================================

    /// Issue → spend → spend, each hop proven against the previous one.
    #[test]
    fn test_three_hop_chain() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());

        let t1 = ledger
            .settle(&body(vec![], vec![cash(1, 100), cash(2, 50)], 0xF0), vec![])
            .unwrap();

        let t2 = ledger
            .settle(
                &body(vec![StateRef::new(t1.id(), 0)], vec![cash(3, 100)], 1),
                vec![t1.utxo_commitment(0).unwrap()],
            )
            .unwrap();

        let t3 = ledger
            .settle(
                &body(
                    vec![StateRef::new(t2.id(), 0), StateRef::new(t1.id(), 1)],
                    vec![cash(4, 150)],
                    3,
                ),
                vec![t2.utxo_commitment(0).unwrap(), t1.utxo_commitment(1).unwrap()],
            )
            .unwrap();

        assert_eq!(ledger.store.len(), 3);
        for id in [t1.id(), t2.id(), t3.id()] {
            let stored = ledger.store.get_transaction(&id).unwrap().unwrap();
            assert!(!stored.is_full(), "verifier must never hold plaintext views");
            assert_eq!(stored.top_root(), id);
        }
    }

    /// A commitment for a grandparent output cannot stand in for the parent's.
    #[test]
    fn test_stale_commitment_rejected() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());
        let t1 = ledger
            .settle(&body(vec![], vec![cash(1, 100)], 0xF0), vec![])
            .unwrap();
        let t2 = ledger
            .settle(
                &body(vec![StateRef::new(t1.id(), 0)], vec![cash(2, 100)], 1),
                vec![t1.utxo_commitment(0).unwrap()],
            )
            .unwrap();

        let result = ledger.settle(
            &body(vec![StateRef::new(t2.id(), 0)], vec![cash(3, 100)], 2),
            vec![t1.utxo_commitment(0).unwrap()],
        );
        assert_eq!(
            result.unwrap_err(),
            DisclosureError::UnprovenState {
                group: ComponentGroupKind::Inputs,
                index: 0,
            }
        );
    }

    /// A commitment relabelled onto the parent keeps the grandparent's nonce.
    #[test]
    fn test_relabelled_commitment_rejected() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());
        let t1 = ledger
            .settle(&body(vec![], vec![cash(1, 100)], 0xF0), vec![])
            .unwrap();
        let t2 = ledger
            .settle(
                &body(vec![StateRef::new(t1.id(), 0)], vec![cash(1, 100)], 1),
                vec![t1.utxo_commitment(0).unwrap()],
            )
            .unwrap();

        let mut forged = t1.utxo_commitment(0).unwrap();
        forged.state_ref = StateRef::new(t2.id(), 0);
        let result = ledger.settle(
            &body(vec![StateRef::new(t2.id(), 0)], vec![cash(3, 100)], 1),
            vec![forged],
        );
        assert!(matches!(result, Err(DisclosureError::HashMismatch { .. })));
    }

    /// Spending from a transaction the verifier never settled.
    #[test]
    fn test_spend_from_unknown_transaction() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());
        let elsewhere = Ledger::new(DisclosureConfig::for_testing());
        let t1 = elsewhere
            .settle(&body(vec![], vec![cash(1, 100)], 0xF0), vec![])
            .unwrap();

        let result = ledger.settle(
            &body(vec![StateRef::new(t1.id(), 0)], vec![cash(2, 100)], 1),
            vec![t1.utxo_commitment(0).unwrap()],
        );
        assert_eq!(
            result.unwrap_err(),
            DisclosureError::TransactionResolution { tx_id: t1.id() }
        );
    }

    /// The digest pair travels with the disclosure; verifiers need no prior agreement.
    #[test]
    fn test_non_default_digests_end_to_end() {
        let mut config = DisclosureConfig::for_testing();
        config.leaf_digest = DigestAlgorithm::Sha3_256;
        config.node_digest = DigestAlgorithm::Blake3;
        let ledger = Ledger::new(config);

        let t1 = ledger
            .settle(&body(vec![], vec![cash(1, 10)], 0xF0), vec![])
            .unwrap();
        ledger
            .settle(
                &body(vec![StateRef::new(t1.id(), 0)], vec![cash(2, 10)], 1),
                vec![t1.utxo_commitment(0).unwrap()],
            )
            .unwrap();
    }

    /// A hidden command revealed later, checked against the recorded id.
    #[test]
    fn test_late_component_disclosure() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());
        let t1 = ledger
            .settle(&body(vec![], vec![cash(1, 100)], 0xF0), vec![])
            .unwrap();

        let stored = ledger.store.get_transaction(&t1.id()).unwrap().unwrap();
        let command = t1
            .disclose_component(ComponentGroupKind::Commands.ordinal(), 0)
            .unwrap();
        command.verify(&stored.id(), stored.digests()).unwrap();
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    /// Independent transactions verify in parallel against one shared store.
    #[test]
    fn test_parallel_verification() {
        let ledger = Ledger::new(DisclosureConfig::for_testing());
        let issued: Vec<FullTransactionView> = (0..8u8)
            .map(|owner| {
                ledger
                    .settle(&body(vec![], vec![cash(owner, 1)], 0xF0), vec![])
                    .unwrap()
            })
            .collect();

        let payloads: Vec<PartialTransactionPayload> = issued
            .iter()
            .enumerate()
            .map(|(i, prior)| {
                let spend = ledger
                    .service
                    .build_transaction(
                        &body(vec![StateRef::new(prior.id(), 0)], vec![cash(0xEE, 1)], i as u8),
                        PrivacySalt::random(),
                    )
                    .unwrap();
                ledger
                    .service
                    .disclose(&spend, vec![prior.utxo_commitment(0).unwrap()])
            })
            .collect();

        let service = &ledger.service;
        thread::scope(|scope| {
            let handles: Vec<_> = payloads
                .into_iter()
                .map(|payload| scope.spawn(move || service.accept_transaction(payload)))
                .collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }
        });
    }
}
