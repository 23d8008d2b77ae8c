use criterion::{black_box, criterion_group, criterion_main, Criterion};

use marga_path::{GridField, PathOptimizer, PlannerConfig, VehicleState, WorldPoint};

fn straight_reference(points: usize, spacing: f64) -> Vec<VehicleState> {
    (0..points)
        .map(|i| VehicleState::from_position(i as f64 * spacing, 0.0))
        .collect()
}

fn bench_solve(c: &mut Criterion) {
    let mut field = GridField::new(600, 300, 0.2, WorldPoint::new(-20.0, -30.0));
    field.fill_circle(WorldPoint::new(20.0, 0.5), 0.8);
    field.recompute();

    let mut config = PlannerConfig::default();
    config.solver.max_cpu_time = 2.0;

    c.bench_function("solve_40m_with_obstacle", |b| {
        b.iter(|| {
            let mut optimizer = PathOptimizer::with_config(
                straight_reference(21, 2.0),
                VehicleState::new(0.0, 0.0, 0.0),
                VehicleState::new(40.0, 0.0, 0.0),
                &field,
                config,
            );
            black_box(optimizer.solve())
        })
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
