use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pcg_common::executor::test_st_executor;
use pcg_ot::{
    ideal::cot::ideal_rcot,
    spcot::{Receiver, Sender},
    PprfConfig,
};

async fn bench_spcot(alphas: &[usize], each_num: usize) {
    let (mut ctx_sender, mut ctx_receiver) = test_st_executor(8);
    let (rcot_sender, rcot_receiver) = ideal_rcot();
    let delta = rcot_sender.delta();

    let mut sender = Sender::new(PprfConfig::default(), rcot_sender);
    let mut receiver = Receiver::new(PprfConfig::default(), rcot_receiver);
    sender.setup(delta).unwrap();
    receiver.setup().unwrap();

    let (output_sender, output_receiver) = futures::join!(
        sender.extend(&mut ctx_sender, alphas.len(), each_num),
        receiver.extend(&mut ctx_receiver, alphas, each_num)
    );

    black_box((output_sender.unwrap(), output_receiver.unwrap()));
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("spcot");

    let rt = tokio::runtime::Runtime::new().unwrap();
    let alphas: Vec<usize> = (0..16).map(|i| i * 61).collect();
    group.bench_function("16x1024", |b| {
        b.to_async(&rt).iter(|| bench_spcot(&alphas, 1024))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
