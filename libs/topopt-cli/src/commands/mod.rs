//! Subcommand implementations.

pub mod metrics;
pub mod run;

use anyhow::{Context, Result};
use simp_optimizer::{OptimizationMetrics, TopologyOptimizer};
use tracing::{debug, info};
use voxel_mesh::MeshGenerator;

use crate::job::Job;

/// Optimized field wrapped in a generator, plus the run metrics.
pub struct Solved {
    pub generator: MeshGenerator,
    pub metrics: OptimizationMetrics,
}

/// Runs the optimizer for `job`.
pub fn solve(job: &Job, use_kernel: bool) -> Result<Solved> {
    let settings = job.settings()?;
    let faces = job.constraints.faces()?;
    let magnitude = job.loads.resolved_magnitude()?;
    let direction = job.loads.resolved_direction();

    debug!(
        shape = %job.geometry.shape,
        material = %job.material.name,
        youngs_modulus = ?job.material.youngs_modulus(),
        poisson_ratio = ?job.material.poisson_ratio(),
        yield_strength = ?job.material.yield_strength(),
        application_zone = %job.loads.application_zone,
        position = ?job.loads.position,
        safety_factor = job.constraints.safety_factor,
        "Informational job fields"
    );
    info!(
        resolution = settings.resolution,
        volume_fraction = settings.volume_fraction,
        iterations = job.optimization.iterations,
        "Starting optimization"
    );

    let mut optimizer =
        TopologyOptimizer::new(settings).context("Invalid optimizer settings")?;
    optimizer
        .apply_loads_and_constraints(magnitude, direction, &faces)
        .context("Invalid loads or constraints")?;
    let (density, metrics) = optimizer
        .optimize(job.optimization.iterations)
        .context("Optimization failed")?;

    let generator = if use_kernel {
        MeshGenerator::new(density)
    } else {
        MeshGenerator::without_kernel(density)
    };
    Ok(Solved { generator, metrics })
}
