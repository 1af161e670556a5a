//! # Optimization Metrics
//!
//! Per-iteration reports and the run summary returned by the optimizer.

use config::constants::BISECTION_TOLERANCE;
use serde::Serialize;

/// How well one Lagrange bisection met the volume target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeConstraint {
    /// Mean density within the relative tolerance of the target.
    Satisfied,
    /// The bracket closed, but no multiplier reaches the target within the
    /// move limit.
    Unreachable,
    /// The step cap was hit before the bracket closed.
    StepCapReached,
}

impl VolumeConstraint {
    /// Classifies a bisection outcome.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simp_optimizer::VolumeConstraint;
    ///
    /// assert_eq!(VolumeConstraint::classify(0.4, 0.4002, false), VolumeConstraint::Satisfied);
    /// assert_eq!(VolumeConstraint::classify(0.4, 0.2, false), VolumeConstraint::Unreachable);
    /// assert_eq!(VolumeConstraint::classify(0.4, 0.2, true), VolumeConstraint::StepCapReached);
    /// ```
    pub fn classify(target: f64, achieved: f64, step_cap_hit: bool) -> Self {
        if volume_within_tolerance(target, achieved) {
            VolumeConstraint::Satisfied
        } else if step_cap_hit {
            VolumeConstraint::StepCapReached
        } else {
            VolumeConstraint::Unreachable
        }
    }

    /// Returns true for [`VolumeConstraint::Satisfied`].
    pub fn is_satisfied(self) -> bool {
        self == VolumeConstraint::Satisfied
    }
}

/// Returns true when `achieved` is within the bisection tolerance of `target`.
pub fn volume_within_tolerance(target: f64, achieved: f64) -> bool {
    (achieved - target).abs() <= BISECTION_TOLERANCE * target
}

/// Outcome of the Lagrange multiplier search in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BisectionReport {
    /// Bisection steps taken
    pub steps: u32,
    /// Last multiplier midpoint, the one whose densities were kept
    pub lambda: f64,
    /// Mean density produced by that multiplier, before supports are refilled
    pub volume_fraction: f64,
    /// Convergence quality
    pub status: VolumeConstraint,
}

/// Summary of one optimization iteration, passed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationReport {
    /// Zero-based iteration index within the current run
    pub iteration: usize,
    /// Compliance measured before the update
    pub compliance: f64,
    /// Mean density after the update and support enforcement
    pub volume_fraction: f64,
    /// Lagrange search outcome
    pub bisection: BisectionReport,
}

/// Metrics of a completed optimization run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationMetrics {
    /// Compliance of the last iteration
    pub final_compliance: f64,
    /// Mean density after the last iteration
    pub final_volume_fraction: f64,
    /// Number of iterations run
    pub iterations_completed: usize,
    /// Compliance per iteration
    pub compliance_history: Vec<f64>,
    /// Mean density per iteration
    pub volume_history: Vec<f64>,
    /// Iterations whose bisection did not satisfy the volume target
    pub unsatisfied_iterations: usize,
    /// Lagrange search outcome per iteration
    pub bisection_history: Vec<BisectionReport>,
}

impl OptimizationMetrics {
    /// Returns true when every iteration satisfied the volume target.
    pub fn volume_constraint_satisfied(&self) -> bool {
        self.unsatisfied_iterations == 0
    }
}

/// Upper bound on reports reserved up front.
const PREALLOCATED_REPORTS: usize = 1024;

/// Append-only accumulator for iteration reports.
#[derive(Debug, Default)]
pub(crate) struct MetricsRecorder {
    reports: Vec<IterationReport>,
}

impl MetricsRecorder {
    pub(crate) fn with_capacity(iterations: usize) -> Self {
        Self {
            reports: Vec::with_capacity(iterations.min(PREALLOCATED_REPORTS)),
        }
    }

    pub(crate) fn record(&mut self, report: IterationReport) {
        self.reports.push(report);
    }

    /// Freezes the run. Returns `None` when nothing was recorded.
    pub(crate) fn finish(self) -> Option<OptimizationMetrics> {
        let last = *self.reports.last()?;
        Some(OptimizationMetrics {
            final_compliance: last.compliance,
            final_volume_fraction: last.volume_fraction,
            iterations_completed: self.reports.len(),
            compliance_history: self.reports.iter().map(|r| r.compliance).collect(),
            volume_history: self.reports.iter().map(|r| r.volume_fraction).collect(),
            unsatisfied_iterations: self
                .reports
                .iter()
                .filter(|r| !r.bisection.status.is_satisfied())
                .count(),
            bisection_history: self.reports.iter().map(|r| r.bisection).collect(),
        })
    }
}
