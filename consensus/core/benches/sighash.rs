use criterion::{criterion_group, criterion_main, Criterion};
use kastx_consensus_core::{
    hashing::{
        sighash::{calc_schnorr_signature_hash, SigHashReusedValues},
        sighash_type::SIG_HASH_ALL,
    },
    mass::MassCalculator,
    subnets::SUBNETWORK_ID_NATIVE,
    tx::{PopulatedTransaction, ScriptPublicKey, Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput, UtxoEntry},
};
use std::hint::black_box;

fn transaction(inputs: usize, outputs: usize) -> (Transaction, Vec<UtxoEntry>) {
    let spk = ScriptPublicKey::from_vec(0, vec![0x20; 34]);
    let tx = Transaction::new(
        0,
        (0..inputs)
            .map(|i| TransactionInput::new(TransactionOutpoint::new(TransactionId::from_u64_word(i as u64), 0), vec![], 0, 1))
            .collect(),
        (0..outputs).map(|i| TransactionOutput::new(1000 + i as u64, spk.clone())).collect(),
        0,
        SUBNETWORK_ID_NATIVE,
        0,
        vec![],
    );
    let entries = (0..inputs).map(|_| UtxoEntry::new(100_000, spk.clone(), 0, false)).collect();
    (tx, entries)
}

fn bench_sighash(c: &mut Criterion) {
    let (tx, entries) = transaction(100, 2);
    let populated = PopulatedTransaction::new(&tx, entries);
    c.bench_function("sighash/all inputs, shared cache", |b| {
        b.iter(|| {
            let mut reused_values = SigHashReusedValues::new();
            for index in 0..populated.tx.inputs.len() {
                black_box(calc_schnorr_signature_hash(&populated, index, SIG_HASH_ALL, &mut reused_values));
            }
        })
    });
    c.bench_function("sighash/all inputs, cold cache", |b| {
        b.iter(|| {
            for index in 0..populated.tx.inputs.len() {
                black_box(calc_schnorr_signature_hash(&populated, index, SIG_HASH_ALL, &mut SigHashReusedValues::new()));
            }
        })
    });
}

fn bench_mass(c: &mut Criterion) {
    let (tx, _) = transaction(100, 2);
    let calculator = MassCalculator::default();
    c.bench_function("mass/compute", |b| b.iter(|| calculator.calc_tx_compute_mass(black_box(&tx))));
}

criterion_group!(benches, bench_sighash, bench_mass);
criterion_main!(benches);
