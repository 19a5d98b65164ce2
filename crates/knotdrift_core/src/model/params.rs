use std::f64::consts::{FRAC_PI_4, TAU};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Reference base frequency: 2π · 1.2 GHz (rad/s)
pub const REFERENCE_BASE_FREQUENCY: f64 = TAU * 1.2e9;

/// Physical parameters for one integration run.
///
/// Built fresh for every grid point and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Anyon-vacuum coupling strength g (dimensionless)
    pub coupling: f64,
    /// Base angular frequency ω (rad/time)
    pub base_frequency: f64,
    /// Golden-ratio modulation multiplier applied to the braid exponent
    pub modulation_scale: f64,
    /// Phase offset φ₀ of the drive (rad)
    pub phase_offset: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            coupling: 0.85,
            base_frequency: REFERENCE_BASE_FREQUENCY,
            modulation_scale: 1.0,
            phase_offset: FRAC_PI_4,
        }
    }
}

impl ParameterSet {
    pub fn new(
        coupling: f64,
        base_frequency: f64,
        modulation_scale: f64,
        phase_offset: f64,
    ) -> Self {
        Self {
            coupling,
            base_frequency,
            modulation_scale,
            phase_offset,
        }
    }

    /// Copy of `self` with one field replaced
    #[must_use]
    pub fn with(mut self, target: SweepTarget, value: f64) -> Self {
        match target {
            SweepTarget::Coupling => self.coupling = value,
            SweepTarget::BaseFrequency => self.base_frequency = value,
            SweepTarget::ModulationScale => self.modulation_scale = value,
            SweepTarget::PhaseOffset => self.phase_offset = value,
        }
        self
    }

    /// Read one field
    #[must_use]
    pub fn get(&self, target: SweepTarget) -> f64 {
        match target {
            SweepTarget::Coupling => self.coupling,
            SweepTarget::BaseFrequency => self.base_frequency,
            SweepTarget::ModulationScale => self.modulation_scale,
            SweepTarget::PhaseOffset => self.phase_offset,
        }
    }

    /// Check every field against its domain.
    ///
    /// Coupling may be zero (the undriven rotor); the base frequency must be
    /// strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for target in SweepTarget::ALL {
            let value = self.get(target);
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name: target.key(),
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.coupling < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: SweepTarget::Coupling.key(),
                value: self.coupling,
                reason: "must not be negative",
            });
        }
        if self.base_frequency <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: SweepTarget::BaseFrequency.key(),
                value: self.base_frequency,
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

/// Which `ParameterSet` field a sweep axis drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepTarget {
    Coupling,
    BaseFrequency,
    ModulationScale,
    PhaseOffset,
}

impl SweepTarget {
    pub const ALL: [SweepTarget; 4] = [
        SweepTarget::Coupling,
        SweepTarget::BaseFrequency,
        SweepTarget::ModulationScale,
        SweepTarget::PhaseOffset,
    ];

    /// Stable machine-readable name
    pub fn key(self) -> &'static str {
        match self {
            SweepTarget::Coupling => "coupling",
            SweepTarget::BaseFrequency => "base_frequency",
            SweepTarget::ModulationScale => "modulation_scale",
            SweepTarget::PhaseOffset => "phase_offset",
        }
    }

    /// Axis label for plots
    pub fn label(self) -> &'static str {
        match self {
            SweepTarget::Coupling => "Coupling g",
            SweepTarget::BaseFrequency => "Base frequency ω [rad/s]",
            SweepTarget::ModulationScale => "Golden modulation scale",
            SweepTarget::PhaseOffset => "Phase offset φ₀ [rad]",
        }
    }
}
