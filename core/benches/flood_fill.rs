use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lazysweep_core::*;
use std::hint::black_box;

fn bench_flood_fill(c: &mut Criterion) {
    let config = GameConfig::new(255, 255, 0).unwrap();

    c.bench_function("flood_fill_empty_255x255", |b| {
        b.iter_batched(
            || GridEngine::new(config, 1).unwrap(),
            |mut engine| black_box(engine.reveal(black_box(0)).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");

    for (name, config) in [
        ("expert", GameConfig::expert()),
        ("dense_64x64", GameConfig::new(64, 64, 4000).unwrap()),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter_batched(
                || {
                    seed += 1;
                    GridEngine::new(config, seed).unwrap()
                },
                |mut engine| black_box(engine.reveal(black_box(0)).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_flood_fill, bench_population);
criterion_main!(benches);
