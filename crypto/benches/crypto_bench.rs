use ainet_types::{Address, Timestamp};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| ainet_crypto::blake2b_256(black_box(&data)))
    });
}

fn challenge_id_bench(c: &mut Criterion) {
    let verifier = Address::from_low_u64(1);
    let agent = Address::from_low_u64(2);

    c.bench_function("derive_challenge_id", |b| {
        b.iter(|| {
            ainet_crypto::derive_challenge_id(
                black_box(&verifier),
                black_box(&agent),
                "easy",
                black_box(42),
                Timestamp::new(1_700_000_000),
            )
        })
    });
}

fn contract_address_bench(c: &mut Criterion) {
    let deployer = Address::from_low_u64(7);

    c.bench_function("contract_address", |b| {
        b.iter(|| ainet_crypto::contract_address(black_box(&deployer), black_box(3)))
    });
}

criterion_group!(
    benches,
    blake2b_256_bench,
    challenge_id_bench,
    contract_address_bench
);
criterion_main!(benches);
