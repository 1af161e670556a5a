//! topopt run command - optimize, export the mesh and report.

use std::path::Path;

use anyhow::{Context, Result};

use super::solve;
use crate::job::Job;
use crate::report::Report;
use crate::{output, Cli, OutputFormat};

pub fn run(input: &Path, out: Option<&Path>, no_kernel: bool, cli: &Cli) -> Result<()> {
    let job = Job::load(input)?;
    let report = execute(&job, out, !no_kernel, cli.density_field)?;
    match cli.format {
        OutputFormat::Json => output::print_json(&report, cli.format, cli.quiet),
        OutputFormat::Text => {
            if !cli.quiet {
                report.print_text();
            }
        }
    }
    Ok(())
}

/// Runs the full pipeline. Without `out` the mesh goes to the default
/// scratch location.
pub fn execute(
    job: &Job,
    out: Option<&Path>,
    use_kernel: bool,
    include_field: bool,
) -> Result<Report> {
    let solved = solve(job, use_kernel)?;
    let generator = &solved.generator;
    let threshold = job.optimization.density_threshold;

    let mesh = match out {
        Some(path) => generator.generate_mesh_to(threshold, path),
        None => generator.generate_mesh(threshold),
    }
    .context("Mesh export failed")?;

    let geometry = generator.compute_metrics(threshold);
    let report = Report::new(
        &job.material.name,
        threshold,
        geometry,
        &solved.metrics,
        geometry.mass(job.material.density),
    );
    let report = report.with_mesh(&mesh);
    Ok(if include_field {
        report.with_density_field(generator.grid())
    } else {
        report
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use simp_optimizer::OptimizerError;
    use voxel_mesh::{ExportStrategy, MeshError};

    fn job(threshold: f64) -> Job {
        Job::parse(&format!(
            r#"{{ "geometry": {{ "dimensions": [30, 30, 30] }},
                  "material": {{ "name": "steel", "density": 7850 }},
                  "loads": {{ "force_magnitude": 1000 }},
                  "constraints": {{ "fixed_faces": ["bottom"], "volume_fraction": 0.4 }},
                  "optimization": {{ "resolution": 6, "iterations": 3, "density_threshold": {threshold} }} }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_run_writes_kernel_mesh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.stl");
        let report = execute(&job(0.5), Some(&path), true, false).unwrap();

        assert!(path.exists());
        assert_eq!(report.stl_path.as_deref(), Some(path.as_path()));
        assert_eq!(report.strategy, Some(ExportStrategy::Kernel));
        assert_eq!(report.iterations_completed, 3);
        // Supports on the bottom layer stay solid.
        assert!(report.geometry.solid_voxels >= 36);
        assert!(report.density_field.is_none());
    }

    #[test]
    fn test_run_can_include_density_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.stl");
        let report = execute(&job(0.5), Some(&path), true, true).unwrap();

        let field = report.density_field.as_ref().unwrap();
        assert_eq!(field.len(), 216);
        assert_eq!(report.volume_history.len(), 3);
        assert_eq!(field.count_at_least(0.5), report.geometry.solid_voxels);
    }

    #[test]
    fn test_run_without_kernel_writes_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.stl");
        let report = execute(&job(0.5), Some(&path), false, false).unwrap();

        assert_eq!(report.strategy, Some(ExportStrategy::Triangulation));
        assert_eq!(report.triangle_count, Some(12 * report.geometry.solid_voxels));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("solid OptimizedPart"));
    }

    #[test]
    fn test_unreachable_threshold_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("part.stl");
        let err = execute(&job(2.0), Some(&path), true, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MeshError>(),
            Some(MeshError::EmptyResult { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_oversized_resolution_is_rejected() {
        let job = Job::parse(
            r#"{ "geometry": { "dimensions": [10, 10, 10] },
                 "material": { "density": 7850 },
                 "loads": { "magnitude": 10 },
                 "optimization": { "resolution": 4194304, "iterations": 1 } }"#,
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = execute(&job, Some(&dir.path().join("part.stl")), true, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OptimizerError>(),
            Some(OptimizerError::InvalidParameter { name: "resolution", .. })
        ));
    }
}
