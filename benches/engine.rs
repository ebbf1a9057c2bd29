use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_match::core::{
    attempt_swap, create_initial, find_hint, find_matches, shuffle_grid, EngineConfig, Grid,
    TileSpawner,
};

fn stock_grid(seed: u32) -> (Grid, TileSpawner, EngineConfig) {
    let config = EngineConfig::default();
    let mut spawner = TileSpawner::new(seed);
    let grid = create_initial(&config, &mut spawner).expect("stock config is valid");
    (grid, spawner, config)
}

fn bench_initial_deal(c: &mut Criterion) {
    let config = EngineConfig::default();

    c.bench_function("initial_deal_8x8", |b| {
        b.iter(|| {
            let mut spawner = TileSpawner::new(black_box(12345));
            create_initial(&config, &mut spawner)
        })
    });
}

fn bench_find_matches(c: &mut Criterion) {
    let (grid, _, _) = stock_grid(12345);

    c.bench_function("find_matches_8x8", |b| {
        b.iter(|| find_matches(black_box(&grid)))
    });
}

fn bench_swap_cascade(c: &mut Criterion) {
    let (grid, mut spawner, config) = stock_grid(12345);
    let hint = find_hint(&grid)
        .expect("stock grid is stable")
        .expect("fresh boards have moves");

    c.bench_function("swap_cascade_8x8", |b| {
        b.iter(|| attempt_swap(black_box(&grid), hint.a, hint.b, 0, &mut spawner, &config))
    });
}

fn bench_find_hint(c: &mut Criterion) {
    let (grid, _, _) = stock_grid(12345);

    c.bench_function("find_hint_8x8", |b| b.iter(|| find_hint(black_box(&grid))));
}

fn bench_shuffle(c: &mut Criterion) {
    let (grid, mut spawner, config) = stock_grid(12345);

    c.bench_function("shuffle_8x8", |b| {
        b.iter(|| shuffle_grid(black_box(&grid), &mut spawner, &config))
    });
}

criterion_group!(
    benches,
    bench_initial_deal,
    bench_find_matches,
    bench_swap_cascade,
    bench_find_hint,
    bench_shuffle
);
criterion_main!(benches);
