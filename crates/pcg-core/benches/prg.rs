use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use pcg_core::{block::Block, prg::Prg};
use rand_core::RngCore;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("prg");

    const BYTES_PER: u64 = 16 * 1024;
    group.throughput(Throughput::Bytes(BYTES_PER));
    group.bench_function("bytes", move |bench| {
        let mut prg = Prg::new();
        let mut x = vec![0u8; BYTES_PER as usize];
        bench.iter(|| {
            prg.fill_bytes(black_box(&mut x));
        });
    });

    const BLOCKS_PER: u64 = 16 * 1024;
    group.throughput(Throughput::Elements(BLOCKS_PER));
    group.bench_function("blocks", move |bench| {
        let mut prg = Prg::new();
        let mut x = vec![Block::ZERO; BLOCKS_PER as usize];
        bench.iter(|| {
            prg.random_blocks(black_box(&mut x));
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
