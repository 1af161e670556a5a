//! # Optimality Criteria Update
//!
//! Redistributes material according to the filtered sensitivities while
//! holding the mean density at the target volume fraction. The Lagrange
//! multiplier is found by bisection on a fixed bracket; each candidate
//! density is limited to a move of `MOVE_LIMIT` from the previous value and
//! clamped into the density band.

use crate::metrics::{BisectionReport, VolumeConstraint};
use config::constants::{
    relative_gap, BISECTION_TOLERANCE, DENSITY_MAX, DENSITY_MIN, LAMBDA_EPSILON, LAMBDA_LOWER,
    LAMBDA_UPPER, MAX_BISECTION_STEPS, MOVE_LIMIT, OC_RATIO_FLOOR,
};

/// Updated densities for multiplier `lambda`.
///
/// Each cell becomes `ρ · sqrt(max(-s / λ, 1e-6))`, limited to
/// `[ρ - move, ρ + move]` and then to the density band.
pub fn candidate_densities(density: &[f64], sensitivity: &[f64], lambda: f64, out: &mut [f64]) {
    for ((next, &rho), &s) in out.iter_mut().zip(density).zip(sensitivity) {
        let ratio = -s / (lambda + LAMBDA_EPSILON);
        let proposed = rho * ratio.max(OC_RATIO_FLOOR).sqrt();
        *next = DENSITY_MIN.max((rho - MOVE_LIMIT).max(DENSITY_MAX.min((rho + MOVE_LIMIT).min(proposed))));
    }
}

/// Runs the bisection and returns the new densities with a report on how
/// well the volume target was met.
///
/// The densities of the last midpoint are kept even if the step cap ends
/// the search; the report's status tells the caller which case occurred.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::oc::update_densities;
///
/// let density = vec![0.5; 8];
/// let sensitivity = vec![-1.0; 8];
/// let (next, report) = update_densities(&density, &sensitivity, 0.5);
/// assert!(next.iter().all(|&d| (0.3..=0.7).contains(&d)));
/// assert!(report.steps > 0);
/// ```
pub fn update_densities(density: &[f64], sensitivity: &[f64], target: f64) -> (Vec<f64>, BisectionReport) {
    let mut low = LAMBDA_LOWER;
    let mut high = LAMBDA_UPPER;
    let mut steps = 0;
    let mut lambda = 0.5 * (low + high);
    let mut candidate = density.to_vec();
    let mut volume = mean(&candidate);

    while relative_gap(low, high) > BISECTION_TOLERANCE && steps < MAX_BISECTION_STEPS {
        steps += 1;
        lambda = (0.5 * (high + low)).max(LAMBDA_EPSILON);
        candidate_densities(density, sensitivity, lambda, &mut candidate);
        volume = mean(&candidate);

        if volume > target {
            low = lambda;
        } else {
            high = lambda;
        }
    }

    let step_cap_hit = relative_gap(low, high) > BISECTION_TOLERANCE;
    let report = BisectionReport {
        steps,
        lambda,
        volume_fraction: volume,
        status: VolumeConstraint::classify(target, volume, step_cap_hit),
    };
    (candidate, report)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
