//! Run configuration.
//!
//! One explicit structure holds every constant a sweep depends on: the
//! parameter ranges, the braiding constants, the time grid, the drift
//! window and the solver tolerances. Presets reproduce the reference runs.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::drift::TailWindow;
use crate::error::ConfigError;
use crate::integrator::IntegratorSettings;
use crate::model::{
    BraidingDrive, ParameterSet, REFERENCE_BASE_FREQUENCY, REFERENCE_BRAID_PHASE, SweepTarget,
    TREFOIL_LINKING_NUMBER, TimeSpan,
};
use crate::sweep::{AxisSpec, SweepRequest};

/// Bounds of the integration interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

/// Values used for parameters no axis drives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedParameters {
    pub coupling: f64,
    pub base_frequency: f64,
    pub modulation_scale: f64,
}

impl Default for FixedParameters {
    fn default() -> Self {
        Self {
            coupling: 0.85,
            base_frequency: REFERENCE_BASE_FREQUENCY,
            modulation_scale: 1.0,
        }
    }
}

/// Where the coupling × modulation sweep takes its base frequency from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyPin {
    /// Median of the frequency axis
    #[default]
    AxisMedian,
    /// `fixed.base_frequency`
    Fixed,
}

/// A sweep layout the run should execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    /// Coupling × base frequency, modulation held fixed
    CouplingVsFrequency,
    /// Coupling × modulation scale, base frequency pinned
    CouplingVsModulation,
    /// Coupling only
    Coupling,
    /// Base frequency only
    Frequency,
    /// Modulation scale only
    Modulation,
}

impl PlanKind {
    pub fn name(self) -> &'static str {
        match self {
            PlanKind::CouplingVsFrequency => "coupling_vs_frequency",
            PlanKind::CouplingVsModulation => "coupling_vs_modulation",
            PlanKind::Coupling => "coupling",
            PlanKind::Frequency => "frequency",
            PlanKind::Modulation => "modulation",
        }
    }
}

fn default_plans() -> Vec<PlanKind> {
    vec![PlanKind::CouplingVsFrequency, PlanKind::CouplingVsModulation]
}

fn default_phase_offset() -> f64 {
    FRAC_PI_4
}

fn default_braid_phase() -> f64 {
    REFERENCE_BRAID_PHASE
}

fn default_linking_number() -> f64 {
    TREFOIL_LINKING_NUMBER
}

/// Complete description of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub coupling_range: AxisSpec,
    pub frequency_range: AxisSpec,
    pub modulation_range: AxisSpec,
    #[serde(default = "default_phase_offset")]
    pub phase_offset: f64,
    /// Argument of the braiding phase R = exp(i·β)
    #[serde(default = "default_braid_phase")]
    pub braid_phase: f64,
    #[serde(default = "default_linking_number")]
    pub linking_number: f64,
    pub time_span: TimeRange,
    pub sample_count: usize,
    #[serde(default)]
    pub tail_window: TailWindow,
    #[serde(default)]
    pub tolerances: IntegratorSettings,
    #[serde(default)]
    pub fixed: FixedParameters,
    #[serde(default)]
    pub frequency_pin: FrequencyPin,
    #[serde(default = "default_plans")]
    pub plans: Vec<PlanKind>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::grid()
    }
}

impl RunConfig {
    /// 18 × 16 coupling/frequency grid and 18 × 11 coupling/modulation grid
    pub fn grid() -> Self {
        Self {
            coupling_range: AxisSpec::linear(0.1, 1.8, 18),
            frequency_range: AxisSpec::log(1e8, 5e9, 16),
            modulation_range: AxisSpec::linear(0.80, 1.20, 11),
            phase_offset: default_phase_offset(),
            braid_phase: default_braid_phase(),
            linking_number: default_linking_number(),
            time_span: TimeRange {
                start: 0.0,
                end: 60.0,
            },
            sample_count: 3000,
            tail_window: TailWindow::Fraction(0.5),
            tolerances: IntegratorSettings::with_tolerances(1e-8, 1e-10),
            fixed: FixedParameters::default(),
            frequency_pin: FrequencyPin::AxisMedian,
            plans: default_plans(),
        }
    }

    /// Reduced 12 × 10 and 12 × 9 grids over a shorter span
    pub fn logspace() -> Self {
        Self {
            coupling_range: AxisSpec::linear(0.2, 1.6, 12),
            frequency_range: AxisSpec::log(1e8, 5e9, 10),
            modulation_range: AxisSpec::linear(0.85, 1.15, 9),
            time_span: TimeRange {
                start: 0.0,
                end: 50.0,
            },
            sample_count: 1800,
            ..Self::grid()
        }
    }

    /// Coupling × modulation only, at the reference frequency
    pub fn minimal() -> Self {
        Self {
            coupling_range: AxisSpec::linear(0.2, 1.5, 14),
            modulation_range: AxisSpec::linear(0.85, 1.15, 11),
            time_span: TimeRange {
                start: 0.0,
                end: 50.0,
            },
            sample_count: 2000,
            tolerances: IntegratorSettings::with_tolerances(1e-8, 1e-6),
            frequency_pin: FrequencyPin::Fixed,
            plans: vec![PlanKind::CouplingVsModulation],
            ..Self::logspace()
        }
    }

    /// Single long trajectory at tight tolerances, drift over the last 800 samples
    pub fn trajectory() -> Self {
        Self {
            time_span: TimeRange {
                start: 0.0,
                end: 60.0,
            },
            sample_count: 2500,
            tail_window: TailWindow::Count(800),
            tolerances: IntegratorSettings::with_tolerances(1e-9, 1e-12),
            plans: vec![PlanKind::Coupling],
            ..Self::grid()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "grid" => Some(Self::grid()),
            "logspace" => Some(Self::logspace()),
            "minimal" => Some(Self::minimal()),
            "trajectory" => Some(Self::trajectory()),
            _ => None,
        }
    }

    pub const PRESETS: [&'static str; 4] = ["grid", "logspace", "minimal", "trajectory"];

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.coupling_range.validate("coupling_range")?;
        self.frequency_range.validate("frequency_range")?;
        self.modulation_range.validate("modulation_range")?;
        if !(self.time_span.start.is_finite() && self.time_span.end > self.time_span.start) {
            return Err(ConfigError::TimeSpan(format!(
                "end ({}) must exceed start ({})",
                self.time_span.end, self.time_span.start
            )));
        }
        if self.sample_count < 2 {
            return Err(ConfigError::TimeSpan(format!(
                "sample_count must be at least 2, got {}",
                self.sample_count
            )));
        }
        for (name, value) in [
            ("braid_phase", self.braid_phase),
            ("linking_number", self.linking_number),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.plans.is_empty() {
            return Err(ConfigError::AxisCount(0));
        }
        self.tail_window.validate()?;
        self.tolerances.validate()?;
        self.fixed_parameters().validate()
    }

    /// The braiding model these constants describe
    pub fn drive(&self) -> BraidingDrive {
        BraidingDrive::new(self.braid_phase, self.linking_number)
    }

    pub fn time_grid(&self) -> Result<TimeSpan, ConfigError> {
        TimeSpan::linspace(self.time_span.start, self.time_span.end, self.sample_count)
    }

    pub fn fixed_parameters(&self) -> ParameterSet {
        ParameterSet::new(
            self.fixed.coupling,
            self.fixed.base_frequency,
            self.fixed.modulation_scale,
            self.phase_offset,
        )
    }

    /// Base frequency the coupling × modulation sweep runs at
    pub fn pinned_frequency(&self) -> Result<f64, ConfigError> {
        match self.frequency_pin {
            FrequencyPin::Fixed => Ok(self.fixed.base_frequency),
            FrequencyPin::AxisMedian => self
                .frequency_range
                .generate(SweepTarget::BaseFrequency)?
                .median()
                .ok_or(ConfigError::EmptyAxis(SweepTarget::BaseFrequency)),
        }
    }

    /// Build the request for one plan
    pub fn request(&self, plan: PlanKind) -> Result<SweepRequest, ConfigError> {
        let coupling = || self.coupling_range.generate(SweepTarget::Coupling);
        let frequency = || self.frequency_range.generate(SweepTarget::BaseFrequency);
        let modulation = || self.modulation_range.generate(SweepTarget::ModulationScale);

        let mut fixed = self.fixed_parameters();
        let axes = match plan {
            PlanKind::CouplingVsFrequency => vec![coupling()?, frequency()?],
            PlanKind::CouplingVsModulation => {
                fixed.base_frequency = self.pinned_frequency()?;
                vec![coupling()?, modulation()?]
            }
            PlanKind::Coupling => vec![coupling()?],
            PlanKind::Frequency => vec![frequency()?],
            PlanKind::Modulation => vec![modulation()?],
        };

        let request = SweepRequest {
            name: plan.name().to_string(),
            axes,
            fixed,
            time_span: self.time_grid()?,
            settings: self.tolerances,
            window: self.tail_window,
        };
        request.validate()?;
        Ok(request)
    }

    /// Requests for every configured plan, validated up front
    pub fn requests(&self) -> Result<Vec<SweepRequest>, ConfigError> {
        self.validate()?;
        self.plans.iter().map(|&plan| self.request(plan)).collect()
    }
}
