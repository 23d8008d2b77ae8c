//! End-to-end optimizer scenarios over literal inputs.

use marga_path::core::math::deg_to_rad;
use marga_path::frenet::curvature;
use marga_path::{
    GridField, PathOptimizer, PlanError, PlannerConfig, VehicleState, WorldPoint,
};

/// Collinear reference along the +X axis.
fn straight_reference(points: usize, spacing: f64) -> Vec<VehicleState> {
    (0..points)
        .map(|i| VehicleState::from_position(i as f64 * spacing, 0.0))
        .collect()
}

/// 120 m x 60 m free field around the origin at 0.2 m resolution.
fn open_field() -> GridField {
    GridField::new(600, 300, 0.2, WorldPoint::new(-20.0, -30.0))
}

/// Default configuration with a test-friendly solver time budget.
fn test_config() -> PlannerConfig {
    let mut config = PlannerConfig::default();
    config.solver.max_cpu_time = 2.0;
    config
}

fn max_abs_y(path: &[VehicleState]) -> f64 {
    path.iter().fold(0.0, |acc, s| acc.max(s.y.abs()))
}

fn assert_dense_and_monotone(path: &[VehicleState]) {
    assert!(path.len() > 10, "path too sparse: {} states", path.len());
    // Interior samples land about delta_s / 3 apart; the clamped spline
    // ends move faster through the parameter, so the bound is delta_s.
    for pair in path.windows(2) {
        let spacing = pair[0].distance(&pair[1]);
        assert!(spacing <= 1.6, "sample spacing {} too large", spacing);
        assert!(pair[1].s >= pair[0].s, "arc-length not monotone");
    }
}

#[test]
fn straight_corridor_stays_on_axis() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(38.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let path = optimizer.solve().expect("straight corridor must solve");

    assert_dense_and_monotone(&path);
    assert!(max_abs_y(&path) < 0.05, "max |y| = {}", max_abs_y(&path));

    // Peak curvature along the output stays negligible.
    let xs: Vec<f64> = path.iter().map(|s| s.x).collect();
    let ys: Vec<f64> = path.iter().map(|s| s.y).collect();
    let profile = curvature::estimate(&xs, &ys);
    assert!(profile.max_abs < 0.01, "max |k| = {}", profile.max_abs);

    // The smoothed reference is available for visualization.
    assert!(optimizer.smoothed_reference().len() > 100);
}

#[test]
fn solving_own_output_is_stable() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(38.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let first = optimizer.solve().expect("first solve");

    let mut again =
        PathOptimizer::with_config(first.clone(), start, end, &field, test_config());
    let second = again.solve().expect("second solve on own output");

    assert_dense_and_monotone(&second);
    assert!(max_abs_y(&second) < 0.05);
    assert!(second.last().unwrap().s > 30.0);
}

#[test]
fn lateral_offset_start_recenters() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 1.0, 0.0);
    let end = VehicleState::new(38.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let path = optimizer.solve().expect("offset start must solve");

    assert_dense_and_monotone(&path);

    // The hard-fixed first offset reproduces the start pose exactly.
    assert!((path[0].y - 1.0).abs() < 1e-6, "path[0].y = {}", path[0].y);
    assert!(path[0].x.abs() < 1e-6);

    // The path drifts back toward the reference without overshooting.
    for state in &path {
        assert!(state.y > -0.3, "overshoot to y = {}", state.y);
        assert!(state.y < 1.2, "diverged to y = {}", state.y);
    }
    let tail_start = path.len() * 3 / 4;
    for state in &path[tail_start..] {
        assert!(state.y.abs() < 0.5, "tail not recentered: y = {}", state.y);
    }
}

#[test]
fn start_heading_mismatch_aborts() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 0.0, deg_to_rad(85.0));
    let end = VehicleState::new(38.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let error = optimizer.solve().unwrap_err();
    assert!(matches!(error, PlanError::HeadingMismatchStart { .. }));

    // The boolean variant reports failure and clears the output.
    let mut output = vec![VehicleState::default()];
    assert!(!optimizer.solve_into(&mut output));
    assert!(output.is_empty());
}

#[test]
fn end_heading_mismatch_aborts() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(38.0, 0.0, deg_to_rad(120.0));

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let error = optimizer.solve().unwrap_err();
    assert!(matches!(error, PlanError::HeadingMismatchEnd { .. }));
}

#[test]
fn empty_reference_aborts() {
    let field = open_field();
    let start = VehicleState::default();
    let end = VehicleState::new(10.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(Vec::new(), start, end, &field, test_config());
    assert_eq!(optimizer.solve().unwrap_err(), PlanError::EmptyReference);
}

#[test]
fn obstacle_avoidance_swerves_with_clearance() {
    // A 0.8 m disc sits just left of the reference 20 m ahead; the
    // footprint-inflated clearance demands roughly 3 m of swerve.
    let mut field = open_field();
    let obstacle = WorldPoint::new(20.0, 0.5);
    field.fill_circle(obstacle, 0.8);
    field.recompute();

    let reference = straight_reference(21, 2.0);
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(40.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let path = optimizer.solve().expect("avoidance must solve");

    assert_dense_and_monotone(&path);

    // The path bends around the obstacle and returns to the reference.
    let peak = max_abs_y(&path);
    assert!(peak > 2.0, "swerve too small: {}", peak);
    assert!(peak < 6.5, "swerve too large: {}", peak);
    assert!(
        path.last().unwrap().y.abs() < 1.7,
        "tail y = {}",
        path.last().unwrap().y
    );

    // Every sample keeps the rear-circle clearance from the obstacle.
    for state in &path {
        let distance = state.position().distance(&obstacle);
        assert!(
            distance > 2.1,
            "state at ({:.2}, {:.2}) is {:.2} m from the obstacle",
            state.x,
            state.y,
            distance
        );
    }
}

#[test]
fn short_reference_is_handled_cleanly() {
    let field = open_field();
    let reference = straight_reference(6, 0.6); // 3 m long
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(3.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    match optimizer.solve() {
        Ok(path) => {
            assert!(!path.is_empty());
            for state in &path {
                assert!(state.x.is_finite() && state.y.is_finite());
            }
            for pair in path.windows(2) {
                assert!(pair[1].s >= pair[0].s);
            }
        }
        Err(PlanError::SolverFailed { .. }) => {
            // A clean solver failure is acceptable for degenerate inputs.
        }
        Err(other) => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn sub_segment_reference_does_not_panic() {
    // Arc length in (0.3, 0.32]: one nominal station and a remainder
    // below the tail-append threshold. This must come back as a clean
    // result, never a panic in the program assembly.
    let field = open_field();
    let reference = vec![
        VehicleState::from_position(0.0, 0.0),
        VehicleState::from_position(0.31, 0.0),
    ];
    let start = VehicleState::new(0.0, 0.0, 0.0);
    let end = VehicleState::new(0.31, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    match optimizer.solve() {
        Ok(path) => {
            assert!(!path.is_empty());
            for state in &path {
                assert!(state.x.is_finite() && state.y.is_finite());
            }
            for pair in path.windows(2) {
                assert!(pair[1].s >= pair[0].s);
            }
        }
        Err(PlanError::SolverFailed { .. }) => {
            // A clean solver failure is acceptable for degenerate inputs.
        }
        Err(other) => panic!("unexpected failure: {other:?}"),
    }
}

#[test]
fn large_initial_heading_refines_stationing() {
    let field = open_field();
    let reference = straight_reference(20, 2.0);
    let start = VehicleState::new(0.0, 0.0, deg_to_rad(35.0));
    let end = VehicleState::new(38.0, 0.0, 0.0);

    let mut optimizer =
        PathOptimizer::with_config(reference, start, end, &field, test_config());
    let path = optimizer.solve().expect("large heading error must solve");

    let layout = optimizer.stations().expect("stations exposed after solve");
    assert!(layout.refined_start);
    let lengths = layout.segment_lengths();
    for h in lengths.iter().take(6) {
        assert!((h - 1.6 / 3.0).abs() < 1e-9, "refined spacing was {}", h);
    }

    // The path starts along the misaligned heading and recovers onto the
    // reference.
    assert!((path[0].heading - deg_to_rad(35.0)).abs() < 1e-9);
    let tail_start = path.len() * 2 / 3;
    for state in &path[tail_start..] {
        assert!(state.y.abs() < 0.6, "tail not recovered: y = {}", state.y);
    }
}
