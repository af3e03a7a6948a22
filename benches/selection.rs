use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use spin_wheel::core::rng::DeterministicRng;
use spin_wheel::wheel::locator::segment_at;
use spin_wheel::wheel::planner::RotationPlanner;
use spin_wheel::wheel::selection::select_index;
use spin_wheel::{Distribution, WeightMap};

fn make_entries(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("entry-{i}")).collect()
}

fn make_weights(entries: &[String]) -> WeightMap {
    entries
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), 0.1 + (i % 30) as f64 / 10.0))
        .collect()
}

fn bench_selection(c: &mut Criterion) {
    let entries = make_entries(64);
    let weights = make_weights(&entries);

    c.bench_function("distribution_from_weights_64", |b| {
        b.iter(|| Distribution::from_weights(black_box(&entries), Some(black_box(&weights))))
    });

    let distribution = match Distribution::from_weights(&entries, Some(&weights)) {
        Ok(distribution) => distribution,
        Err(e) => panic!("bench weights rejected: {e}"),
    };
    let mut rng = DeterministicRng::new(42);
    c.bench_function("select_index_64", |b| {
        b.iter(|| select_index(black_box(&distribution), &mut rng))
    });
}

fn bench_geometry(c: &mut Criterion) {
    let planner = RotationPlanner::default();
    let mut rng = DeterministicRng::new(7);
    let mut angle = 0.0;

    c.bench_function("plan_and_locate_12", |b| {
        b.iter(|| {
            let plan = planner.plan(black_box(5), 12, angle, &mut rng);
            angle = plan.target_angle % 360.0;
            segment_at(angle, 12)
        })
    });
}

criterion_group!(benches, bench_selection, bench_geometry);
criterion_main!(benches);
