//! Model types: per-point parameters, the braided phase-velocity law, and
//! the sampled trajectories the integrator produces.

mod params;
mod trajectory;
mod velocity;

pub use params::*;
pub use trajectory::*;
pub use velocity::*;
