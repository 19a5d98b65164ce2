//! Net drift of a braided phase rotor
//!
//! This crate integrates a toy phase-accumulation model driven by a periodic
//! topological forcing term and measures its net drift rate across grids of
//! physical parameters. It provides:
//! - The braided phase-velocity law (`model`)
//! - An adaptive Dormand-Prince RK4(5) integrator with dense output (`integrator`)
//! - A windowed drift estimator (`drift`)
//! - One- and two-axis parameter sweeps with per-point failure isolation (`sweep`)
//! - Run configuration with the reference presets (`config`)
//! - Trefoil curve and linking-number helpers for illustrations (`knot`)
//!
//! ```ignore
//! use knotdrift_core::{RunConfig, sweep};
//!
//! let config = RunConfig::minimal();
//! let model = config.drive();
//! for request in config.requests()? {
//!     let result = sweep(&model, &request)?;
//!     println!("{}: {} undefined", result.name, result.undefined_count());
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod drift;
pub mod error;
pub mod integrator;
pub mod knot;
pub mod model;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use config::{PlanKind, RunConfig};
pub use drift::{PhaseSummary, TailWindow, estimate_drift};
pub use error::{ConfigError, DriftError, IntegrationFailure};
pub use integrator::{IntegratorSettings, integrate};
pub use model::{BraidingDrive, ParameterSet, PhaseModel, TimeSpan, Trajectory};
pub use sweep::{DriftCell, DriftSweep, SweepRequest, sweep};
