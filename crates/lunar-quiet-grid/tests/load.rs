//! Integration tests for loading coefficient grids from files.

use approx::assert_relative_eq;
use lunar_quiet_grid::{Coefficient, CoefficientGrid, ExtrapolationPolicy, GridError};
use std::path::PathBuf;
use tempfile::TempDir;

const GRID_JSON: &str = r#"{
    "heights_km": [0.0, 50.0, 100.0, 150.0],
    "thresholds_db": [-90.0, -70.0, -50.0],
    "a_grid": [
        [1000.0, 1100.0, 1200.0],
        [1100.0, 1200.0, 1300.0],
        [1200.0, 1300.0, 1400.0],
        [1300.0, 1400.0, 1500.0]
    ],
    "b_grid": [
        [-0.50, -0.54, -0.58],
        [-0.45, -0.49, -0.53],
        [-0.40, -0.44, -0.48],
        [-0.35, -0.39, -0.43]
    ]
}"#;

/// Write `contents` to `name` inside a fresh temporary directory.
fn write_fixture(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write fixture");
    (temp_dir, path)
}

#[test]
fn test_load_json_file() {
    let (_temp_dir, path) = write_fixture("grid.json", GRID_JSON);
    let grid = CoefficientGrid::from_path(&path).expect("Failed to load grid");

    assert_eq!(grid.dimensions(), (4, 3));

    let (a, b) = grid.coefficients(75.0, -60.0);
    assert_relative_eq!(a, 1150.0 + 150.0, epsilon = 1e-9);
    assert_relative_eq!(b, -0.425 - 0.06, epsilon = 1e-12);
}

#[test]
fn test_load_yaml_file() {
    let json: serde_json::Value = serde_json::from_str(GRID_JSON).expect("Fixture is valid JSON");
    let yaml = serde_yaml::to_string(&json).expect("Should convert to YAML");
    let (_temp_dir, path) = write_fixture("grid.yaml", &yaml);
    let grid = CoefficientGrid::from_path(&path).expect("Failed to load YAML grid");

    assert_eq!(grid.interpolant(Coefficient::A).evaluate(150.0, -50.0), 1500.0);
    assert_eq!(grid.interpolant(Coefficient::B).evaluate(0.0, -90.0), -0.50);
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = CoefficientGrid::from_path(temp_dir.path().join("does-not-exist.json"));
    assert!(matches!(result, Err(GridError::Io(_))));
}

#[test]
fn test_malformed_file_is_decode_error() {
    let (_temp_dir, path) = write_fixture("broken.json", "{ \"heights_km\": [0.0, ");
    let result = CoefficientGrid::from_path(&path);
    assert!(matches!(result, Err(GridError::Json(_))));
}

#[test]
fn test_grid_edges_do_not_fail() {
    let grid = CoefficientGrid::from_json_str(GRID_JSON).expect("Failed to parse grid");

    // Every edge and corner returns the boundary sample
    assert_eq!(grid.coefficients(0.0, -90.0), (1000.0, -0.50));
    assert_eq!(grid.coefficients(150.0, -90.0), (1300.0, -0.35));
    assert_eq!(grid.coefficients(0.0, -50.0), (1200.0, -0.58));
    assert_eq!(grid.coefficients(150.0, -50.0), (1500.0, -0.43));
}

#[test]
fn test_extrapolation_policies() {
    let grid = CoefficientGrid::from_json_str(GRID_JSON).expect("Failed to parse grid");
    assert_eq!(grid.coefficients(200.0, -40.0), grid.coefficients(150.0, -50.0));

    let strict = grid.with_extrapolation(ExtrapolationPolicy::NotANumber);
    let (a, b) = strict.coefficients(200.0, -40.0);
    assert!(a.is_nan() && b.is_nan());
}

#[test]
fn test_shared_across_threads() {
    let grid = std::sync::Arc::new(CoefficientGrid::from_json_str(GRID_JSON).expect("Failed to parse grid"));
    let expected = grid.coefficients(73.5, -85.0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let grid = std::sync::Arc::clone(&grid);
            std::thread::spawn(move || grid.coefficients(73.5, -85.0))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread panicked"), expected);
    }
}
