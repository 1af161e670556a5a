//! # Optimizer Settings
//!
//! Construction parameters of the optimizer with their defaults and
//! validation.

use crate::error::{OptimizerError, OptimizerResult};
use config::constants::{DEFAULT_PENAL, DEFAULT_RMIN};
use density_grid::GridDims;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Parameters fixed for the lifetime of an optimizer.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::OptimizerSettings;
/// use glam::DVec3;
///
/// let settings = OptimizerSettings::new(DVec3::splat(100.0), 5, 0.4).with_penal(2.0);
/// assert_eq!(settings.penal, 2.0);
/// assert_eq!(settings.rmin, 1.5);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// Physical length, width and height (mm)
    pub dimensions: DVec3,
    /// Cells per axis
    pub resolution: usize,
    /// Target mean density in (0, 1]
    pub volume_fraction: f64,
    /// SIMP penalization exponent, at least 1
    pub penal: f64,
    /// Gaussian sensitivity filter sigma, in cells
    pub rmin: f64,
}

impl OptimizerSettings {
    /// Creates settings with the default penalization and filter radius.
    pub fn new(dimensions: DVec3, resolution: usize, volume_fraction: f64) -> Self {
        Self {
            dimensions,
            resolution,
            volume_fraction,
            penal: DEFAULT_PENAL,
            rmin: DEFAULT_RMIN,
        }
    }

    /// Sets the penalization exponent.
    pub fn with_penal(mut self, penal: f64) -> Self {
        self.penal = penal;
        self
    }

    /// Sets the filter radius.
    pub fn with_rmin(mut self, rmin: f64) -> Self {
        self.rmin = rmin;
        self
    }

    /// Checks every parameter range.
    pub fn validate(&self) -> OptimizerResult<()> {
        if self.resolution == 0 {
            return Err(OptimizerError::invalid("resolution", "must be at least 1"));
        }
        let r = self.resolution;
        if GridDims::cell_count(r, r, r).is_none() {
            return Err(OptimizerError::invalid(
                "resolution",
                format!("{r}³ cells overflow the grid index"),
            ));
        }
        if !(self.volume_fraction > 0.0 && self.volume_fraction <= 1.0) {
            return Err(OptimizerError::invalid(
                "volume_fraction",
                format!("must be in (0, 1], got {}", self.volume_fraction),
            ));
        }
        if !self.dimensions.is_finite() || self.dimensions.min_element() <= 0.0 {
            return Err(OptimizerError::invalid(
                "dimensions",
                format!("must be positive and finite, got {:?}", self.dimensions),
            ));
        }
        if !(self.penal >= 1.0 && self.penal.is_finite()) {
            return Err(OptimizerError::invalid(
                "penal",
                format!("must be at least 1, got {}", self.penal),
            ));
        }
        if !(self.rmin > 0.0 && self.rmin.is_finite()) {
            return Err(OptimizerError::invalid(
                "rmin",
                format!("must be positive, got {}", self.rmin),
            ));
        }
        Ok(())
    }
}
