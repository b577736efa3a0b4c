use bountygrid_core::{GameConfig, LayoutGenerator, RandomLayoutGenerator};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (bounties, energy) in [(1, 0), (5, 22), (20, 30), (60, 60)] {
        let config = GameConfig::new((12, 12), bounties, energy);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}b-{}e", bounties, energy)),
            &config,
            |b, &config| b.iter(|| RandomLayoutGenerator::new(42).generate(config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
