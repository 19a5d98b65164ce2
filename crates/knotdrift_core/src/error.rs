use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::SweepTarget;

/// Caller-side configuration mistakes.
///
/// These abort a sweep before any grid point is integrated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An axis was requested with zero points
    EmptyAxis(SweepTarget),
    /// A sweep needs one or two axes
    AxisCount(usize),
    /// Two axes of one sweep drive the same parameter
    DuplicateAxis(SweepTarget),
    /// Range bounds are unusable for the requested spacing
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
        reason: &'static str,
    },
    /// A scalar parameter is out of its allowed domain
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Evaluation points are missing or not strictly increasing
    TimeSpan(String),
    /// Tail window cannot select samples
    InvalidWindow(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyAxis(target) => write!(f, "axis '{}' has no points", target.key()),
            ConfigError::AxisCount(n) => {
                write!(f, "a sweep needs one or two axes, got {n}")
            }
            ConfigError::DuplicateAxis(target) => {
                write!(f, "parameter '{}' is swept by more than one axis", target.key())
            }
            ConfigError::InvalidRange {
                name,
                min,
                max,
                reason,
            } => write!(f, "invalid range for {name} (min={min}, max={max}): {reason}"),
            ConfigError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid {name}={value}: {reason}"),
            ConfigError::TimeSpan(msg) => write!(f, "invalid time span: {msg}"),
            ConfigError::InvalidWindow(msg) => write!(f, "invalid tail window: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Why the adaptive solver gave up on a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrationFailure {
    /// The solver could not shrink its step enough to get past `time`
    StepUnderflow { time: f64 },
    /// `max_steps` attempts were spent before reaching the end of the span
    StepBudgetExhausted { time: f64, steps: usize },
    /// The right-hand side returned NaN or infinity
    NonFiniteDerivative { time: f64 },
    /// The continuous extension could not be evaluated at `time`
    DenseOutput { time: f64 },
}

impl fmt::Display for IntegrationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationFailure::StepUnderflow { time } => {
                write!(f, "step size underflow near t={time}")
            }
            IntegrationFailure::StepBudgetExhausted { time, steps } => {
                write!(f, "step budget of {steps} exhausted at t={time}")
            }
            IntegrationFailure::NonFiniteDerivative { time } => {
                write!(f, "non-finite derivative at t={time}")
            }
            IntegrationFailure::DenseOutput { time } => {
                write!(f, "no dense output at t={time}")
            }
        }
    }
}

impl std::error::Error for IntegrationFailure {}

/// Why no drift value could be extracted from a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DriftError {
    /// The integration did not reach the end of its span
    NotConverged { failure: Option<IntegrationFailure> },
    /// Fewer than two samples fell into the tail window
    DegenerateWindow { samples: usize },
    /// The windowed average was not a finite number
    NonFinite,
}

impl fmt::Display for DriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftError::NotConverged { failure: Some(e) } => {
                write!(f, "integration did not converge: {e}")
            }
            DriftError::NotConverged { failure: None } => {
                write!(f, "integration did not converge")
            }
            DriftError::DegenerateWindow { samples } => {
                write!(f, "tail window holds {samples} sample(s), need at least 2")
            }
            DriftError::NonFinite => write!(f, "drift estimate is not finite"),
        }
    }
}

impl std::error::Error for DriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriftError::NotConverged { failure: Some(e) } => Some(e),
            _ => None,
        }
    }
}

impl From<IntegrationFailure> for DriftError {
    fn from(e: IntegrationFailure) -> Self {
        DriftError::NotConverged { failure: Some(e) }
    }
}
