//! # Configuration Constants
//!
//! Centralized constants for the topology optimization pipeline. Density
//! bounds, Optimality Criteria parameters, filter settings, and mesh export
//! defaults are defined here.
//!
//! ## Categories
//!
//! - **Density**: Admissible density band and numeric floors
//! - **Optimality Criteria**: Move limit and Lagrange bisection parameters
//! - **Filtering**: Gaussian sensitivity filter settings
//! - **Defaults**: Parameter defaults for the optimizer and exporter
//! - **Export**: STL naming and scratch locations

// =============================================================================
// DENSITY CONSTANTS
// =============================================================================

/// Lower bound of every density cell.
///
/// Cells are never fully void, which keeps the SIMP stiffness `ρ^p` away
/// from zero.
///
/// # Example
///
/// ```rust
/// use config::constants::DENSITY_MIN;
///
/// let density: f64 = 0.0;
/// assert_eq!(density.max(DENSITY_MIN), 0.001);
/// ```
pub const DENSITY_MIN: f64 = 0.001;

/// Upper bound of every density cell (fully solid).
pub const DENSITY_MAX: f64 = 1.0;

/// Density floor used when weighting sensitivities by `ρ^(p-1)`.
pub const SENSITIVITY_DENSITY_FLOOR: f64 = 1e-6;

/// Regularizer added to `ρ^p` in the compliance sum.
///
/// # Example
///
/// ```rust
/// use config::constants::COMPLIANCE_EPSILON;
///
/// let stiffness: f64 = 0.0;
/// assert!((1.0 / (stiffness + COMPLIANCE_EPSILON)).is_finite());
/// ```
pub const COMPLIANCE_EPSILON: f64 = 1e-9;

// =============================================================================
// OPTIMALITY CRITERIA CONSTANTS
// =============================================================================

/// Maximum absolute density change of a cell in one iteration.
pub const MOVE_LIMIT: f64 = 0.2;

/// Lower end of the initial Lagrange multiplier bracket.
///
/// Strictly positive so the multiplier can never divide by zero.
pub const LAMBDA_LOWER: f64 = 1e-10;

/// Upper end of the initial Lagrange multiplier bracket.
pub const LAMBDA_UPPER: f64 = 1e9;

/// Floor applied to the bisection midpoint and added to it as a divisor guard.
pub const LAMBDA_EPSILON: f64 = 1e-10;

/// Relative bracket width at which the bisection stops.
///
/// The same tolerance decides whether the achieved mean density satisfies
/// the volume target.
///
/// # Example
///
/// ```rust
/// use config::constants::{relative_gap, BISECTION_TOLERANCE};
///
/// assert!(relative_gap(1.0, 1.0005) <= BISECTION_TOLERANCE);
/// ```
pub const BISECTION_TOLERANCE: f64 = 1e-3;

/// Hard cap on bisection steps per iteration.
pub const MAX_BISECTION_STEPS: u32 = 100;

/// Floor applied to the OC ratio `B = -s / λ` before its square root.
pub const OC_RATIO_FLOOR: f64 = 1e-6;

// =============================================================================
// PROXY ANALYSIS CONSTANTS
// =============================================================================

/// Raw sensitivity of cells under the load patch.
pub const LOAD_SENSITIVITY: f64 = -1.0;

/// Raw sensitivity of cells on a fixed support face.
pub const SUPPORT_SENSITIVITY: f64 = -0.8;

/// Minimum magnitude of the distance-based raw sensitivity.
pub const MIN_FIELD_SENSITIVITY: f64 = 0.1;

/// Decay of the distance-based raw sensitivity per grid cell.
pub const SENSITIVITY_DECAY: f64 = 0.1;

/// Half width (in cells) of the square load patch on the top face.
///
/// # Example
///
/// ```rust
/// use config::constants::LOAD_PATCH_HALF_WIDTH;
///
/// // The patch covers [c - 2, c + 2) on both in-plane axes: 4 x 4 cells.
/// assert_eq!(LOAD_PATCH_HALF_WIDTH * 2, 4);
/// ```
pub const LOAD_PATCH_HALF_WIDTH: usize = 2;

// =============================================================================
// FILTER CONSTANTS
// =============================================================================

/// Gaussian kernel truncation, in standard deviations.
///
/// # Example
///
/// ```rust
/// use config::constants::gaussian_radius;
///
/// // sigma = 1.5 reaches six cells on each side.
/// assert_eq!(gaussian_radius(1.5), 6);
/// ```
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default SIMP penalization exponent.
pub const DEFAULT_PENAL: f64 = 3.0;

/// Default sensitivity filter radius (Gaussian sigma, in cells).
pub const DEFAULT_RMIN: f64 = 1.5;

/// Default target volume fraction.
pub const DEFAULT_VOLUME_FRACTION: f64 = 0.4;

/// Default grid resolution per axis.
pub const DEFAULT_RESOLUTION: usize = 25;

/// Default number of optimization iterations.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Default density threshold for solid voxels.
pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.5;

/// Iteration interval for summary progress logging.
pub const PROGRESS_LOG_INTERVAL: usize = 10;

// =============================================================================
// EXPORT CONSTANTS
// =============================================================================

/// Solid name written in the ASCII STL header and trailer.
pub const STL_SOLID_NAME: &str = "OptimizedPart";

/// Scratch directory (under the system temp dir) for exported meshes.
pub const SCRATCH_DIR_NAME: &str = "topology_optimization";

/// Default file name of the exported mesh.
pub const DEFAULT_MESH_FILE_NAME: &str = "optimized_part.stl";

/// Relative tolerance for snapping box corners onto the voxel lattice.
///
/// Boxes whose size or lattice offset deviates by more than this fraction
/// of the voxel size are rejected by the box-union kernel.
pub const LATTICE_TOLERANCE: f64 = 1e-6;

/// Cubic millimetres per cubic metre.
///
/// # Example
///
/// ```rust
/// use config::constants::MM3_PER_M3;
///
/// let volume_m3 = 1_000_000.0 / MM3_PER_M3;
/// assert_eq!(volume_m3, 0.001);
/// ```
pub const MM3_PER_M3: f64 = 1e9;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a density value into `[DENSITY_MIN, DENSITY_MAX]`.
///
/// # Example
///
/// ```rust
/// use config::constants::clamp_density;
///
/// assert_eq!(clamp_density(-1.0), 0.001);
/// assert_eq!(clamp_density(2.0), 1.0);
/// assert_eq!(clamp_density(0.5), 0.5);
/// ```
#[inline]
pub fn clamp_density(value: f64) -> f64 {
    value.clamp(DENSITY_MIN, DENSITY_MAX)
}

/// Relative gap `(high - low) / (low + high)` of a positive bracket.
///
/// # Example
///
/// ```rust
/// use config::constants::relative_gap;
///
/// assert_eq!(relative_gap(1.0, 3.0), 0.5);
/// ```
#[inline]
pub fn relative_gap(low: f64, high: f64) -> f64 {
    (high - low) / (low + high)
}

/// Half width of a truncated Gaussian kernel for the given sigma.
///
/// Rounds `GAUSSIAN_TRUNCATE * sigma` to the nearest integer.
#[inline]
pub fn gaussian_radius(sigma: f64) -> usize {
    (GAUSSIAN_TRUNCATE * sigma + 0.5) as usize
}
