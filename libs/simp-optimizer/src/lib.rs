//! # SIMP Optimizer
//!
//! Density-based topology optimization over a cubic voxel grid.
//! Redistributes material inside a box-shaped domain so that the structure
//! carrying a top-face load stays stiff while meeting a volume target.
//!
//! ## Architecture
//!
//! ```text
//! OptimizerSettings → TopologyOptimizer ─┬→ analysis (proxy compliance)
//!                                        ├→ filter   (Gaussian smoothing)
//!                                        └→ oc       (bisection update)
//!                                              ↓
//!                                  DensityGrid + OptimizationMetrics
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use simp_optimizer::{Face, TopologyOptimizer};
//! use glam::DVec3;
//!
//! let mut optimizer = TopologyOptimizer::with_defaults(DVec3::splat(100.0), 5, 0.4).unwrap();
//! optimizer
//!     .apply_loads_and_constraints(1000.0, DVec3::NEG_Z, &[Face::Bottom])
//!     .unwrap();
//! let (grid, metrics) = optimizer.optimize(2).unwrap();
//! assert_eq!(grid.len(), 125);
//! assert_eq!(metrics.compliance_history.len(), 2);
//! ```

pub mod analysis;
pub mod error;
pub mod faces;
pub mod filter;
pub mod masks;
pub mod metrics;
pub mod oc;
pub mod observer;
pub mod optimizer;
pub mod settings;

pub use error::{OptimizerError, OptimizerResult};
pub use faces::Face;
pub use masks::LoadCase;
pub use metrics::{BisectionReport, IterationReport, OptimizationMetrics, VolumeConstraint};
pub use observer::{HistoryObserver, IterationObserver, NoopObserver};
pub use optimizer::TopologyOptimizer;
pub use settings::OptimizerSettings;
