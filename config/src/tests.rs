//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// DENSITY TESTS
// =============================================================================

#[test]
fn test_density_band_is_ordered() {
    assert!(DENSITY_MIN > 0.0, "DENSITY_MIN must be positive");
    assert!(DENSITY_MIN < DENSITY_MAX);
    assert_eq!(DENSITY_MAX, 1.0);
}

#[test]
fn test_sensitivity_floor_below_density_min() {
    assert!(SENSITIVITY_DENSITY_FLOOR < DENSITY_MIN);
}

#[test]
fn test_clamp_density_bounds() {
    assert_eq!(clamp_density(0.0), DENSITY_MIN);
    assert_eq!(clamp_density(1.5), DENSITY_MAX);
    assert_eq!(clamp_density(0.42), 0.42);
}

#[test]
fn test_clamp_density_keeps_endpoints() {
    assert_eq!(clamp_density(DENSITY_MIN), DENSITY_MIN);
    assert_eq!(clamp_density(DENSITY_MAX), DENSITY_MAX);
}

// =============================================================================
// OPTIMALITY CRITERIA TESTS
// =============================================================================

#[test]
fn test_lambda_bracket_is_positive_and_ordered() {
    assert!(LAMBDA_LOWER > 0.0);
    assert!(LAMBDA_LOWER < LAMBDA_UPPER);
}

#[test]
fn test_relative_gap_of_initial_bracket_exceeds_tolerance() {
    assert!(relative_gap(LAMBDA_LOWER, LAMBDA_UPPER) > BISECTION_TOLERANCE);
}

#[test]
fn test_relative_gap_closed_bracket() {
    assert_eq!(relative_gap(2.0, 2.0), 0.0);
}

#[test]
fn test_move_limit_in_unit_interval() {
    assert!(MOVE_LIMIT > 0.0 && MOVE_LIMIT < 1.0);
}

#[test]
fn test_bisection_cap_reaches_tolerance_from_initial_bracket() {
    // Halving the bracket MAX_BISECTION_STEPS times must be able to close it.
    let mut high = LAMBDA_UPPER;
    let mut steps = 0;
    while relative_gap(LAMBDA_LOWER, high) > BISECTION_TOLERANCE {
        high = 0.5 * (high + LAMBDA_LOWER);
        steps += 1;
    }
    assert!(steps < MAX_BISECTION_STEPS);
}

// =============================================================================
// PROXY ANALYSIS TESTS
// =============================================================================

#[test]
fn test_raw_sensitivities_are_negative() {
    assert!(LOAD_SENSITIVITY < 0.0);
    assert!(SUPPORT_SENSITIVITY < 0.0);
    assert!(LOAD_SENSITIVITY < SUPPORT_SENSITIVITY);
}

#[test]
fn test_load_patch_is_four_cells_wide() {
    assert_eq!(2 * LOAD_PATCH_HALF_WIDTH, 4);
}

// =============================================================================
// FILTER TESTS
// =============================================================================

#[test]
fn test_gaussian_radius_default_rmin() {
    assert_eq!(gaussian_radius(DEFAULT_RMIN), 6);
}

#[test]
fn test_gaussian_radius_rounds_half_up() {
    assert_eq!(gaussian_radius(1.0), 4);
    assert_eq!(gaussian_radius(0.125), 1);
    assert_eq!(gaussian_radius(0.1), 0);
}

// =============================================================================
// DEFAULT TESTS
// =============================================================================

#[test]
fn test_defaults_in_range() {
    assert!(DEFAULT_PENAL >= 1.0);
    assert!(DEFAULT_RMIN > 0.0);
    assert!(DEFAULT_VOLUME_FRACTION > 0.0 && DEFAULT_VOLUME_FRACTION <= 1.0);
    assert!(DEFAULT_RESOLUTION > 0);
    assert!(DEFAULT_ITERATIONS > 0);
    assert!(DEFAULT_DENSITY_THRESHOLD > DENSITY_MIN);
}

#[test]
fn test_export_names_not_empty() {
    assert!(!STL_SOLID_NAME.is_empty());
    assert!(!STL_SOLID_NAME.contains(char::is_whitespace));
    assert!(DEFAULT_MESH_FILE_NAME.ends_with(".stl"));
}

#[test]
fn test_lattice_tolerance_is_small() {
    assert!(LATTICE_TOLERANCE > 0.0 && LATTICE_TOLERANCE < 1e-3);
}
