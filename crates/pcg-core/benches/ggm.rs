use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use pcg_core::{
    ggm::{expand, HalfTree},
    Block,
};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ggm");

    group.throughput(Throughput::Elements(1));
    group.bench_function("expand", move |bench| {
        let seed: Block = rand::random();
        bench.iter(|| black_box(expand(black_box(seed))));
    });

    const DEPTH: usize = 10;
    group.throughput(Throughput::Elements(1 << DEPTH));
    group.bench_function("gen", move |bench| {
        let tree_desc = HalfTree::new(DEPTH);
        let key: Block = rand::random();
        let delta: Block = rand::random();
        let mut tree = vec![Block::ZERO; tree_desc.leaf_count()];
        let mut k0 = vec![Block::ZERO; DEPTH];
        bench.iter(|| {
            tree_desc.gen(key, delta, black_box(&mut tree), &mut k0);
        });
    });

    group.bench_function("reconstruct", move |bench| {
        let tree_desc = HalfTree::new(DEPTH);
        let k: Vec<Block> = (0..DEPTH).map(|_| rand::random()).collect();
        let mut tree = vec![Block::ZERO; tree_desc.leaf_count()];
        bench.iter(|| {
            tree_desc.reconstruct(black_box(&mut tree), &k, 517);
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
