use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use spongemd::Md5;

fn bench_md5(c: &mut Criterion) {
    let mut group = c.benchmark_group("md5");

    for &size in &[64usize, 1_024, 65_536, 1_048_576] {
        let data = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("one_shot", size), &data, |b, data| {
            b.iter(|| black_box(spongemd::md5_digest(black_box(data))))
        });

        // Small odd-sized writes exercise the partial-block buffer.
        group.bench_with_input(BenchmarkId::new("chunked_7", size), &data, |b, data| {
            b.iter(|| {
                let mut hasher = Md5::new();
                for chunk in data.chunks(7) {
                    hasher.write(black_box(chunk));
                }
                black_box(hasher.finalize())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_md5);
criterion_main!(benches);
