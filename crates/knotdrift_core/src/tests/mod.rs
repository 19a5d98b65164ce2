//! Engine tests for the knotdrift core
//!
//! Tests are organized by topic:
//! - `integrator` - Dormand-Prince accuracy, dense output and failure reporting
//! - `model_properties` - Periodicity and degenerate limits of the braided drive
//! - `sweeps` - Grid assembly, failure isolation and the reference scenarios
