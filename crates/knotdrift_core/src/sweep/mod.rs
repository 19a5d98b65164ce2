//! Parameter sweeps of the net drift.
//!
//! A sweep integrates the phase model at every point of the outer product of
//! one or two parameter axes, reduces each trajectory to its drift, and
//! stores the result in a row-major grid whose first axis varies slowest:
//!
//! ```ignore
//! use knotdrift_core::sweep::{AxisSpec, SweepRequest, sweep};
//!
//! let request = SweepRequest {
//!     name: "coupling_vs_modulation".into(),
//!     axes: vec![
//!         AxisSpec::linear(0.2, 1.5, 14).generate(SweepTarget::Coupling)?,
//!         AxisSpec::linear(0.85, 1.15, 11).generate(SweepTarget::ModulationScale)?,
//!     ],
//!     fixed: ParameterSet::default(),
//!     time_span: TimeSpan::linspace(0.0, 50.0, 2000)?,
//!     settings: IntegratorSettings::default(),
//!     window: TailWindow::Fraction(0.5),
//! };
//! let result = sweep(&BraidingDrive::default(), &request)?;
//! assert_eq!(result.shape(), &[14, 11]);
//! ```
//!
//! Points whose integration fails hold `DriftCell::Undefined`; they never
//! stop the sweep.

mod axis;
mod driver;
mod grid;
mod results;

pub use axis::*;
pub use driver::*;
pub use grid::*;
pub use results::*;
