//! topopt metrics command - optimize and report without writing a mesh.

use std::path::Path;

use anyhow::Result;

use super::solve;
use crate::job::Job;
use crate::report::Report;
use crate::{output, Cli, OutputFormat};

pub fn run(input: &Path, cli: &Cli) -> Result<()> {
    let job = Job::load(input)?;
    let report = execute(&job, cli.density_field)?;
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

pub fn execute(job: &Job, include_field: bool) -> Result<Report> {
    let solved = solve(job, true)?;
    let threshold = job.optimization.density_threshold;
    let geometry = solved.generator.compute_metrics(threshold);
    let report = Report::new(
        &job.material.name,
        threshold,
        geometry,
        &solved.metrics,
        geometry.mass(job.material.density),
    );
    Ok(if include_field {
        report.with_density_field(solved.generator.grid())
    } else {
        report
    })
}
