//! Match engine throughput benchmarks: matches per second, timed and untimed.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use quidditch::roster::Team;
use quidditch::sim::{simulate_match, MatchConfig, Rng};

fn bench_matches(c: &mut Criterion) {
    let mut setup_rng = Rng::new(7);
    let home = Team::random("Falcons", &mut setup_rng);
    let away = Team::random("Harpies", &mut setup_rng);

    let mut group = c.benchmark_group("match");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    // Timed match (two hours) - bounded number of attacks
    group.bench_function("timed_120_minutes", |b| {
        let config = MatchConfig {
            time_limit: Some(120),
        };
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut rng = Rng::new(seed);
            black_box(simulate_match(&home, &away, config, &mut rng))
        });
    });

    // Untimed match - runs until the snitch is caught
    group.bench_function("untimed_to_catch", |b| {
        let config = MatchConfig::default();
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            let mut rng = Rng::new(seed);
            black_box(simulate_match(&home, &away, config, &mut rng))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_matches);
criterion_main!(benches);
