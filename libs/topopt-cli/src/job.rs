//! Job documents: the JSON input of the `topopt` commands.
//!
//! Field names follow the request payload of the web front end, including
//! its short and long aliases.

use std::path::Path;

use anyhow::{bail, Context, Result};
use config::constants::{
    DEFAULT_DENSITY_THRESHOLD, DEFAULT_ITERATIONS, DEFAULT_RESOLUTION, DEFAULT_VOLUME_FRACTION,
};
use glam::DVec3;
use serde::Deserialize;
use simp_optimizer::{Face, OptimizerSettings};

/// A complete optimization job.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    pub geometry: Geometry,
    pub material: Material,
    #[serde(default)]
    pub loads: Loads,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub optimization: Optimization,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(default = "default_shape")]
    pub shape: String,
    /// Length, width, height (mm)
    pub dimensions: Vec<f64>,
}

/// Material properties. Only `density` enters the computation; the
/// stiffness values are reported back unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct Material {
    #[serde(default = "default_material_name")]
    pub name: String,
    #[serde(rename = "E")]
    pub e: Option<f64>,
    pub youngs_modulus: Option<f64>,
    pub nu: Option<f64>,
    pub poisson_ratio: Option<f64>,
    pub sigma_ys: Option<f64>,
    pub yield_strength: Option<f64>,
    /// kg/m³
    pub density: f64,
}

impl Material {
    pub fn youngs_modulus(&self) -> Option<f64> {
        self.e.or(self.youngs_modulus)
    }

    pub fn poisson_ratio(&self) -> Option<f64> {
        self.nu.or(self.poisson_ratio)
    }

    pub fn yield_strength(&self) -> Option<f64> {
        self.sigma_ys.or(self.yield_strength)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Loads {
    pub magnitude: Option<f64>,
    pub force_magnitude: Option<f64>,
    /// Axis string such as `-Z`
    pub direction: Option<String>,
    #[serde(default = "default_force_direction")]
    pub force_direction: [f64; 3],
    pub position: Option<String>,
    #[serde(default = "default_application_zone")]
    pub application_zone: String,
}

impl Default for Loads {
    fn default() -> Self {
        Self {
            magnitude: None,
            force_magnitude: None,
            direction: None,
            force_direction: default_force_direction(),
            position: None,
            application_zone: default_application_zone(),
        }
    }
}

impl Loads {
    /// Force magnitude in newtons; `magnitude` wins over `force_magnitude`.
    pub fn resolved_magnitude(&self) -> Result<f64> {
        match self.magnitude.or(self.force_magnitude) {
            Some(value) => Ok(value),
            None => bail!("loads: one of `magnitude` or `force_magnitude` is required"),
        }
    }

    /// Force direction; a known axis string wins over `force_direction`.
    pub fn resolved_direction(&self) -> DVec3 {
        self.direction
            .as_deref()
            .and_then(axis_direction)
            .unwrap_or_else(|| DVec3::from_array(self.force_direction))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Constraints {
    #[serde(default = "default_fixed_faces")]
    pub fixed_faces: Vec<String>,
    #[serde(default = "default_volume_fraction")]
    pub volume_fraction: f64,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            fixed_faces: default_fixed_faces(),
            volume_fraction: default_volume_fraction(),
            safety_factor: default_safety_factor(),
        }
    }
}

impl Constraints {
    pub fn faces(&self) -> Result<Vec<Face>> {
        Face::parse_all(&self.fixed_faces).context("constraints.fixed_faces")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Optimization {
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_density_threshold")]
    pub density_threshold: f64,
}

impl Default for Optimization {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            iterations: default_iterations(),
            density_threshold: default_density_threshold(),
        }
    }
}

impl Job {
    /// Reads and parses a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Invalid job file {:?}", path))
    }

    /// Parses a job from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let job: Job = serde_json::from_str(text)?;
        job.dimensions()?;
        Ok(job)
    }

    /// Domain extents as a vector.
    pub fn dimensions(&self) -> Result<DVec3> {
        match self.geometry.dimensions.as_slice() {
            &[x, y, z] => Ok(DVec3::new(x, y, z)),
            other => bail!(
                "geometry.dimensions needs exactly 3 values, got {}",
                other.len()
            ),
        }
    }

    /// Optimizer settings with the default penalization and filter radius.
    pub fn settings(&self) -> Result<OptimizerSettings> {
        Ok(OptimizerSettings::new(
            self.dimensions()?,
            self.optimization.resolution,
            self.constraints.volume_fraction,
        ))
    }
}

/// Unit vector for `+X`, `-X`, `+Y`, `-Y`, `+Z`, `-Z`.
pub fn axis_direction(axis: &str) -> Option<DVec3> {
    match axis {
        "+X" => Some(DVec3::X),
        "-X" => Some(DVec3::NEG_X),
        "+Y" => Some(DVec3::Y),
        "-Y" => Some(DVec3::NEG_Y),
        "+Z" => Some(DVec3::Z),
        "-Z" => Some(DVec3::NEG_Z),
        _ => None,
    }
}

fn default_shape() -> String {
    "box".to_string()
}

fn default_material_name() -> String {
    "steel".to_string()
}

fn default_force_direction() -> [f64; 3] {
    [0.0, 0.0, -1.0]
}

fn default_application_zone() -> String {
    "top_center".to_string()
}

fn default_fixed_faces() -> Vec<String> {
    vec!["bottom".to_string()]
}

fn default_volume_fraction() -> f64 {
    DEFAULT_VOLUME_FRACTION
}

fn default_safety_factor() -> f64 {
    2.0
}

fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn default_density_threshold() -> f64 {
    DEFAULT_DENSITY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "geometry": { "shape": "box", "dimensions": [100, 50, 20] },
        "material": { "name": "aluminium", "E": 7e10, "youngs_modulus": 1.0, "nu": 0.33, "density": 2700 },
        "loads": { "magnitude": 500, "force_magnitude": 1, "direction": "-Y" },
        "constraints": { "fixed_faces": ["bottom", "left"], "volume_fraction": 0.3 },
        "optimization": { "resolution": 12, "iterations": 20, "density_threshold": 0.4 }
    }"#;

    #[test]
    fn test_parse_full_job() {
        let job = Job::parse(FULL).unwrap();
        assert_eq!(job.dimensions().unwrap(), DVec3::new(100.0, 50.0, 20.0));
        assert_eq!(job.material.youngs_modulus(), Some(7e10));
        assert_eq!(job.material.poisson_ratio(), Some(0.33));
        assert_eq!(job.material.yield_strength(), None);
        assert_eq!(job.loads.resolved_magnitude().unwrap(), 500.0);
        assert_eq!(job.loads.resolved_direction(), DVec3::NEG_Y);
        assert_eq!(job.constraints.faces().unwrap(), vec![Face::Bottom, Face::Left]);
        assert_eq!(job.optimization.resolution, 12);

        let settings = job.settings().unwrap();
        assert_eq!(settings.volume_fraction, 0.3);
        assert_eq!(settings.penal, 3.0);
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let job = Job::parse(
            r#"{ "geometry": { "dimensions": [10, 10, 10] },
                 "material": { "density": 7850 },
                 "loads": { "force_magnitude": 1000 } }"#,
        )
        .unwrap();
        assert_eq!(job.geometry.shape, "box");
        assert_eq!(job.material.name, "steel");
        assert_eq!(job.loads.resolved_magnitude().unwrap(), 1000.0);
        assert_eq!(job.loads.resolved_direction(), DVec3::NEG_Z);
        assert_eq!(job.constraints.fixed_faces, vec!["bottom"]);
        assert_eq!(job.constraints.volume_fraction, 0.4);
        assert_eq!(job.constraints.safety_factor, 2.0);
        assert_eq!(job.optimization.resolution, 25);
        assert_eq!(job.optimization.iterations, 50);
        assert_eq!(job.optimization.density_threshold, 0.5);
    }

    #[test]
    fn test_unknown_axis_falls_back_to_vector() {
        let loads = Loads {
            direction: Some("sideways".to_string()),
            force_direction: [1.0, 0.0, 0.0],
            ..Loads::default()
        };
        assert_eq!(loads.resolved_direction(), DVec3::X);
    }

    #[test]
    fn test_missing_magnitude_is_an_error() {
        assert!(Loads::default().resolved_magnitude().is_err());
    }

    #[test]
    fn test_bad_dimensions_rejected() {
        let err = Job::parse(
            r#"{ "geometry": { "dimensions": [10, 10] }, "material": { "density": 1000 } }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly 3"));
    }

    #[test]
    fn test_missing_density_rejected() {
        assert!(Job::parse(r#"{ "geometry": { "dimensions": [1, 1, 1] }, "material": {} }"#).is_err());
    }

    #[test]
    fn test_unknown_face_rejected() {
        let constraints = Constraints {
            fixed_faces: vec!["front".to_string()],
            ..Constraints::default()
        };
        assert!(constraints.faces().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(&path, FULL).unwrap();
        let job = Job::load(&path).unwrap();
        assert_eq!(job.material.density, 2700.0);
        assert!(Job::load(&dir.path().join("missing.json")).is_err());
    }
}
