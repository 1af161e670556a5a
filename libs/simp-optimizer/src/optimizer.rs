//! # Topology Optimizer
//!
//! Owns the density grid and drives the SIMP loop:
//!
//! ```text
//! proxy analysis → Gaussian filter → OC update (bisection) → supports → metrics
//! ```
//!
//! The optimizer is single-threaded and deterministic. `optimize` takes
//! `&mut self`, so one instance cannot be driven concurrently.

use crate::analysis::analyze;
use crate::error::{OptimizerError, OptimizerResult};
use crate::faces::Face;
use crate::filter::gaussian_filter;
use crate::masks::{boundary_mask, load_patch, LoadCase};
use crate::metrics::{IterationReport, MetricsRecorder, OptimizationMetrics};
use crate::observer::{IterationObserver, NoopObserver};
use crate::oc::update_densities;
use crate::settings::OptimizerSettings;
use config::constants::{clamp_density, DENSITY_MAX, PROGRESS_LOG_INTERVAL};
use density_grid::{CellMask, DensityGrid, GridDims};
use glam::DVec3;
use tracing::{debug, info, info_span, warn};

/// Supports and load patch, built together and never mutated.
#[derive(Debug, Clone)]
struct LoadSetup {
    supports: CellMask,
    load: CellMask,
    load_case: LoadCase,
    fixed_faces: Vec<Face>,
}

/// SIMP topology optimizer over a cubic-resolution grid.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::{Face, OptimizerSettings, TopologyOptimizer};
/// use glam::DVec3;
///
/// let settings = OptimizerSettings::new(DVec3::splat(100.0), 5, 0.4);
/// let mut optimizer = TopologyOptimizer::new(settings).unwrap();
/// optimizer
///     .apply_loads_and_constraints(1000.0, DVec3::NEG_Z, &[Face::Bottom])
///     .unwrap();
/// let (grid, metrics) = optimizer.optimize(3).unwrap();
/// assert_eq!(metrics.iterations_completed, 3);
/// assert_eq!(grid.get(2, 2, 0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct TopologyOptimizer {
    settings: OptimizerSettings,
    density: DensityGrid,
    setup: Option<LoadSetup>,
}

impl TopologyOptimizer {
    /// Creates an optimizer with a grid uniformly filled at the target
    /// volume fraction.
    pub fn new(settings: OptimizerSettings) -> OptimizerResult<Self> {
        settings.validate()?;
        let dims = GridDims::cubic(settings.resolution)?;
        // Targets below the density floor start at the floor.
        let density = DensityGrid::filled(
            dims,
            settings.dimensions,
            clamp_density(settings.volume_fraction),
        )?;
        Ok(Self {
            settings,
            density,
            setup: None,
        })
    }

    /// Creates an optimizer with default penalization and filter radius.
    pub fn with_defaults(dimensions: DVec3, resolution: usize, volume_fraction: f64) -> OptimizerResult<Self> {
        Self::new(OptimizerSettings::new(dimensions, resolution, volume_fraction))
    }

    /// Builds the support mask from `fixed_faces` and the load patch on the
    /// top face, and records the load case.
    ///
    /// Replaces any previous setup.
    pub fn apply_loads_and_constraints(
        &mut self,
        force_magnitude: f64,
        force_direction: DVec3,
        fixed_faces: &[Face],
    ) -> OptimizerResult<()> {
        let load_case = LoadCase::new(force_magnitude, force_direction)?;
        let dims = self.density.dims();
        let supports = boundary_mask(dims, fixed_faces);
        let load = load_patch(dims);
        debug!(
            supports = supports.count(),
            load_cells = load.count(),
            force = force_magnitude,
            faces = ?fixed_faces,
            "Applied loads and constraints"
        );
        self.setup = Some(LoadSetup {
            supports,
            load,
            load_case,
            fixed_faces: fixed_faces.to_vec(),
        });
        Ok(())
    }

    /// Runs `iterations` optimization passes.
    ///
    /// Returns a copy of the final density field and the run metrics.
    pub fn optimize(&mut self, iterations: usize) -> OptimizerResult<(DensityGrid, OptimizationMetrics)> {
        self.optimize_with_observer(iterations, &mut NoopObserver)
    }

    /// Runs `iterations` optimization passes, reporting each to `observer`.
    pub fn optimize_with_observer(
        &mut self,
        iterations: usize,
        observer: &mut dyn IterationObserver,
    ) -> OptimizerResult<(DensityGrid, OptimizationMetrics)> {
        let setup = self.setup.as_ref().ok_or(OptimizerError::NotConfigured)?;
        if iterations == 0 {
            return Err(OptimizerError::invalid("iterations", "must be at least 1"));
        }

        let span = info_span!(
            "simp_optimize",
            resolution = self.settings.resolution,
            iterations
        );
        let _guard = span.enter();
        info!(
            volume_fraction = self.settings.volume_fraction,
            penal = self.settings.penal,
            rmin = self.settings.rmin,
            "Starting SIMP optimization"
        );

        let dims = self.density.dims();
        let mut recorder = MetricsRecorder::with_capacity(iterations);

        for iteration in 0..iterations {
            let analysis = analyze(&self.density, &setup.supports, &setup.load, self.settings.penal);
            let filtered = gaussian_filter(&analysis.sensitivity, dims, self.settings.rmin);
            let (updated, bisection) =
                update_densities(self.density.cells(), &filtered, self.settings.volume_fraction);

            self.density.assign(updated)?;
            self.density.fill_masked(&setup.supports, DENSITY_MAX);
            let volume_fraction = self.density.mean();

            let report = IterationReport {
                iteration,
                compliance: analysis.compliance,
                volume_fraction,
                bisection,
            };

            debug!(
                iteration,
                compliance = analysis.compliance,
                volume = volume_fraction,
                lambda = bisection.lambda,
                steps = bisection.steps,
                "Iteration complete"
            );
            if !bisection.status.is_satisfied() {
                warn!(
                    iteration,
                    status = ?bisection.status,
                    achieved = bisection.volume_fraction,
                    target = self.settings.volume_fraction,
                    "Volume target not met by Lagrange bisection"
                );
            }
            if iteration % PROGRESS_LOG_INTERVAL == 0 {
                info!(
                    iteration,
                    compliance = format!("{:.4}", analysis.compliance),
                    volume = format!("{:.2}%", volume_fraction * 100.0),
                    "Optimization progress"
                );
            }

            observer.on_iteration(&report);
            recorder.record(report);
        }

        let metrics = recorder
            .finish()
            .ok_or_else(|| OptimizerError::invalid("iterations", "no iteration was recorded"))?;
        info!(
            final_compliance = metrics.final_compliance,
            final_volume_fraction = metrics.final_volume_fraction,
            unsatisfied = metrics.unsatisfied_iterations,
            "SIMP optimization finished"
        );
        Ok((self.density.clone(), metrics))
    }

    /// Construction parameters.
    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Current density field.
    pub fn density(&self) -> &DensityGrid {
        &self.density
    }

    /// Returns true once loads and constraints have been applied.
    pub fn is_configured(&self) -> bool {
        self.setup.is_some()
    }

    /// Fixed support cells, if configured.
    pub fn boundary_mask(&self) -> Option<&CellMask> {
        self.setup.as_ref().map(|s| &s.supports)
    }

    /// Load patch cells, if configured.
    pub fn load_mask(&self) -> Option<&CellMask> {
        self.setup.as_ref().map(|s| &s.load)
    }

    /// Applied load case, if configured.
    pub fn load_case(&self) -> Option<&LoadCase> {
        self.setup.as_ref().map(|s| &s.load_case)
    }

    /// Faces held fixed, if configured.
    pub fn fixed_faces(&self) -> Option<&[Face]> {
        self.setup.as_ref().map(|s| s.fixed_faces.as_slice())
    }
}
