//! Braided phase-velocity law.
//!
//! The phase θ obeys
//!
//!   dθ/dt = ω + g · arg(R^e(t)) · sin(3t + φ₀),   e(t) = Lk · sin(3t) / π · s
//!
//! with R = exp(i·β) a unit braiding phase (β = -3π/5 for the Fibonacci-like
//! R-matrix eigenvalue), Lk = 6 the trefoil linking number and s the golden
//! modulation scale. The drive depends on time only; θ itself never feeds
//! back into the velocity.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::ParameterSet;

/// Harmonic of the trefoil drive (three lobes per turn)
pub const TREFOIL_HARMONIC: f64 = 3.0;

/// Braid phase β of the reference R-matrix eigenvalue, exp(-i·3π/5)
pub const REFERENCE_BRAID_PHASE: f64 = -3.0 * PI / 5.0;

/// Linking number of the primordial trefoil
pub const TREFOIL_LINKING_NUMBER: f64 = 6.0;

/// Right-hand side of a scalar phase ODE.
pub trait PhaseModel {
    /// Instantaneous dθ/dt at `time` for the current `phase`
    fn velocity(&self, time: f64, phase: f64, params: &ParameterSet) -> f64;
}

impl<M: PhaseModel + ?Sized> PhaseModel for &M {
    fn velocity(&self, time: f64, phase: f64, params: &ParameterSet) -> f64 {
        (**self).velocity(time, phase, params)
    }
}

/// Driven rotor with a topological braiding drive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BraidingDrive {
    /// Argument β of the unit braiding phase R = exp(i·β)
    pub braid_phase: f64,
    /// Linking number Lk scaling the braid exponent
    pub linking_number: f64,
}

impl Default for BraidingDrive {
    fn default() -> Self {
        Self {
            braid_phase: REFERENCE_BRAID_PHASE,
            linking_number: TREFOIL_LINKING_NUMBER,
        }
    }
}

impl BraidingDrive {
    pub fn new(braid_phase: f64, linking_number: f64) -> Self {
        Self {
            braid_phase,
            linking_number,
        }
    }

    /// The braiding phase R as a unit complex number
    pub fn braid_factor(&self) -> Complex64 {
        Complex64::from_polar(1.0, self.braid_phase)
    }

    /// Exponent e(t) applied to R
    pub fn exponent(&self, time: f64, modulation_scale: f64) -> f64 {
        self.linking_number * (TREFOIL_HARMONIC * time).sin() / PI * modulation_scale
    }

    /// arg(R^e(t)) on the principal branch, in (-π, π]
    pub fn anyon_factor(&self, time: f64, modulation_scale: f64) -> f64 {
        let exponent = self.exponent(time, modulation_scale);
        principal_arg(self.braid_factor().powf(exponent))
    }
}

impl PhaseModel for BraidingDrive {
    fn velocity(&self, time: f64, _phase: f64, params: &ParameterSet) -> f64 {
        let drive = params.coupling
            * self.anyon_factor(time, params.modulation_scale)
            * (TREFOIL_HARMONIC * time + params.phase_offset).sin();
        params.base_frequency + drive
    }
}

/// Argument of `z` folded into (-π, π]
pub fn principal_arg(z: Complex64) -> f64 {
    let arg = z.arg();
    if arg <= -PI { PI } else { arg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braid_factor_is_unit() {
        let r = BraidingDrive::default().braid_factor();
        assert!((r.norm() - 1.0).abs() < 1e-15);
        assert!((r.re - (-0.309_016_994)).abs() < 1e-8);
        assert!((r.im - (-0.951_056_516)).abs() < 1e-8);
    }

    #[test]
    fn test_principal_arg_maps_negative_pi() {
        let z = Complex64::new(-1.0, -0.0);
        assert_eq!(principal_arg(z), PI);
    }

    #[test]
    fn test_anyon_factor_zero_at_origin() {
        let drive = BraidingDrive::default();
        assert_eq!(drive.anyon_factor(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_anyon_factor_matches_wrapped_angle() {
        // With |β·e| < π the argument is simply β·e
        let drive = BraidingDrive::default();
        let t = 0.1;
        let expected = REFERENCE_BRAID_PHASE * drive.exponent(t, 1.0);
        assert!((drive.anyon_factor(t, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_anyon_factor_wraps_past_pi() {
        // sin(7.5) ≈ 0.938, so β·e ≈ -3.38 rad wraps to ≈ 2.91 rad
        let drive = BraidingDrive::default();
        let t = 2.5;
        let raw = REFERENCE_BRAID_PHASE * drive.exponent(t, 1.0);
        let factor = drive.anyon_factor(t, 1.0);
        assert!(raw < -PI);
        assert!((factor - (raw + 2.0 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_ignores_phase() {
        let drive = BraidingDrive::default();
        let params = ParameterSet::new(1.2, 3.0, 1.0, 0.3);
        let a = drive.velocity(0.7, 0.0, &params);
        let b = drive.velocity(0.7, 1.0e6, &params);
        assert_eq!(a, b);
    }
}
