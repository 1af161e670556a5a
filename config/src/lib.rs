//! # Config Crate
//!
//! Centralized configuration constants for the topology optimization
//! pipeline. All magic numbers and tunable parameters are defined here so
//! the optimizer and the mesh exporter agree on bounds and defaults.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{clamp_density, DENSITY_MAX, DENSITY_MIN, MOVE_LIMIT};
//!
//! // A density update never leaves the admissible band.
//! let previous = 0.3;
//! let proposed = (previous + MOVE_LIMIT * 2.0_f64).min(previous + MOVE_LIMIT);
//! let next = clamp_density(proposed);
//! assert!(next >= DENSITY_MIN && next <= DENSITY_MAX);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Output Compatible**: Numeric guards match the reference optimizer
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
