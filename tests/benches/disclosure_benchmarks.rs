//! # Selective Disclosure Benchmarks
//!
//! | Operation | Work | Scales with |
//! |-----------|------|-------------|
//! | Build full view | serialize, pad, nonce + leaf per component | padded component count |
//! | Reconstruct + verify partial view | recompute disclosed roots and top root | disclosed component count |
//! | UTXO verify | one leaf hash, one store lookup | constant |

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_18_selective_disclosure::{
    Command, DisclosureConfig, DisclosureService, InMemoryTransactionStore, OutputState, Party,
    PartialTransactionView, PrivacySalt, SelectiveDisclosureApi, StateRef, TransactionBody,
};
use rand::Rng;

const SIZES: [usize; 4] = [4, 16, 64, 256];

fn config_for(size: usize) -> DisclosureConfig {
    let mut config = DisclosureConfig::default();
    config.padding.inputs_size = Some(size);
    config.padding.outputs_size = Some(size);
    config.padding.references_size = Some(size);
    config
}

fn random_body(inputs: usize, outputs: usize) -> TransactionBody {
    let mut rng = rand::thread_rng();
    TransactionBody {
        inputs: (0..inputs)
            .map(|i| StateRef::new(rng.gen(), i as u32))
            .collect(),
        outputs: (0..outputs)
            .map(|_| OutputState {
                discriminant: rng.gen_range(0..4),
                data: (0..64).map(|_| rng.gen()).collect(),
            })
            .collect(),
        commands: vec![Command {
            discriminant: 1,
            data: b"move".to_vec(),
            signers: vec![vec![0xB0; 32]],
        }],
        notary: Some(Party {
            name: "O=Notary, L=London, C=GB".to_string(),
            owning_key: vec![0xA0; 32],
        }),
        parameters_hash: Some(rng.gen()),
        ..Default::default()
    }
}

fn service_for(size: usize) -> DisclosureService<InMemoryTransactionStore> {
    let config = config_for(size);
    let store = Arc::new(InMemoryTransactionStore::new(config.store_capacity));
    match DisclosureService::new(config, store) {
        Ok(service) => service,
        Err(err) => panic!("benchmark config rejected: {err}"),
    }
}

// ============================================================================
// Full view construction
// ============================================================================

fn bench_build_full_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-build-full-view");
    group.measurement_time(Duration::from_secs(5));

    for size in SIZES {
        let service = service_for(size);
        let body = random_body(size, size);

        group.throughput(Throughput::Elements((size * 2) as u64));
        group.bench_with_input(BenchmarkId::new("inputs_outputs", size), &body, |b, body| {
            b.iter(|| {
                let salt = PrivacySalt::random();
                black_box(service.build_transaction(body, salt).map(|tx| tx.id()))
            })
        });
    }

    group.finish();
}

// ============================================================================
// Partial view reconstruction and verification
// ============================================================================

fn bench_reconstruct_partial_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-partial-view");

    for size in SIZES {
        let service = service_for(size);
        let tx = match service.build_transaction(&random_body(size, size), PrivacySalt::random()) {
            Ok(tx) => tx,
            Err(err) => panic!("benchmark body rejected: {err}"),
        };
        let disclosure = tx.disclosure();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("reconstruct_verify", size),
            &disclosure,
            |b, disclosure| {
                b.iter(|| {
                    let view = PartialTransactionView::reconstruct(disclosure.clone());
                    black_box(view.and_then(|view| view.verify()).is_ok())
                })
            },
        );
    }

    group.finish();
}

// ============================================================================
// UTXO commitment verification
// ============================================================================

fn bench_verify_utxo(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-utxo");

    let size = 16;
    let config = config_for(size);
    let store = Arc::new(InMemoryTransactionStore::new(config.store_capacity));
    let service = match DisclosureService::new(config, store.clone()) {
        Ok(service) => service,
        Err(err) => panic!("benchmark config rejected: {err}"),
    };
    let tx = match service.build_transaction(&random_body(1, size), PrivacySalt::random()) {
        Ok(tx) => tx,
        Err(err) => panic!("benchmark body rejected: {err}"),
    };
    match tx.to_partial() {
        Ok(partial) => store.insert(partial),
        Err(err) => panic!("partial view rejected: {err}"),
    };
    let commitments: Vec<_> = (0..size as u32)
        .filter_map(|index| tx.utxo_commitment(index).ok())
        .collect();

    group.bench_function("verify_single", |b| {
        b.iter(|| black_box(service.verify_utxo(&commitments[0]).is_ok()))
    });

    group.throughput(Throughput::Elements(commitments.len() as u64));
    group.bench_function("verify_all_outputs", |b| {
        b.iter(|| {
            let valid = commitments
                .iter()
                .filter(|commitment| service.verify_utxo(commitment).is_ok())
                .count();
            black_box(valid)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_build_full_view,
    bench_reconstruct_partial_view,
    bench_verify_utxo,
);
criterion_main!(benches);
