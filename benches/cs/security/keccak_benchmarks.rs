use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spongemd::security::keccak_f1600;
use spongemd::{Keccak, StreamingHash};

fn bench_permutation(c: &mut Criterion) {
    c.bench_function("keccak_f1600", |b| {
        let mut state = [0u64; 25];
        b.iter(|| {
            keccak_f1600(black_box(&mut state));
        })
    });
}

fn bench_sponge(c: &mut Criterion) {
    let mut group = c.benchmark_group("sponge");

    let variants: [(&str, Keccak); 4] = [
        ("sha3_256", Keccak::sha3_256()),
        ("sha3_512", Keccak::sha3_512()),
        ("shake128_32", Keccak::shake128(32)),
        ("shake256_1024", Keccak::shake256(1024)),
    ];

    for &size in &[64usize, 1_024, 65_536, 1_048_576] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        for (name, proto) in &variants {
            group.bench_with_input(BenchmarkId::new(*name, size), &data, |b, data| {
                b.iter(|| {
                    let mut hasher = proto.clone();
                    hasher.write(black_box(data));
                    black_box(hasher.digest())
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_permutation, bench_sponge);
criterion_main!(benches);
