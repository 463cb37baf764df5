use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use planet_ratio::bodies::{CalculationKind, ReferenceBase, STANDARD_BODIES};
use planet_ratio::formatting::NumberFormat;
use planet_ratio::Board;

/// Random (body, kind, base, scale) selections.
fn random_selections(rng: &mut StdRng, samples: usize) -> Vec<(usize, usize, usize, f64)> {
    (0..samples)
        .map(|_| {
            (
                rng.random_range(0..STANDARD_BODIES.len()),
                rng.random_range(0..CalculationKind::ALL.len()),
                rng.random_range(0..ReferenceBase::ALL.len()),
                10f64.powi(rng.random_range(-6..=6)),
            )
        })
        .collect()
}

/// One full cascade per inbound set: notify, invalidate, assemble, publish.
fn bench_selection_cascade(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let samples = 1_000usize;

    c.bench_function("derivation_pass/selection_cascade", |b| {
        b.iter_batched(
            || random_selections(&mut rng, samples),
            |cases| {
                let board = Board::new().unwrap();
                for (body, kind, base, scale) in cases {
                    board.select_body(STANDARD_BODIES[body].1).unwrap();
                    board
                        .select_calculation(CalculationKind::ALL[kind])
                        .unwrap();
                    board.select_base(ReferenceBase::ALL[base]).unwrap();
                    board.set_scale(black_box(scale)).unwrap();
                    black_box(board.current_result());
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Recompute with unchanged inputs.
fn bench_refresh(c: &mut Criterion) {
    let board = Board::new().unwrap();
    board.select_body(STANDARD_BODIES[3].1).unwrap();
    board.select_calculation(CalculationKind::Distance).unwrap();
    board.select_base(ReferenceBase::EarthSunDistance).unwrap();

    c.bench_function("derivation_pass/refresh", |b| {
        b.iter(|| {
            board.refresh().unwrap();
            black_box(board.recomputations());
        })
    });
}

fn bench_scientific(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xF00D);
    let values: Vec<f64> = (0..10_000)
        .map(|_| rng.random_range(1.0..10.0) * 10f64.powi(rng.random_range(-12..=12)))
        .collect();
    let fmt = NumberFormat::PT_BR;

    c.bench_function("derivation_pass/scientific_notation", |b| {
        b.iter(|| {
            for x in &values {
                black_box(fmt.scientific(black_box(*x)));
            }
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_selection_cascade, bench_refresh, bench_scientific
);
criterion_main!(benches);
