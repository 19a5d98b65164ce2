//! Net drift extraction from sampled trajectories.
//!
//! The drift is the mean of consecutive phase increments divided by the mean
//! of consecutive time increments over a trailing window, which discards the
//! start-up transient. It is a windowed finite-difference average, not a
//! regression slope.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, DriftError};
use crate::model::Trajectory;

/// Which trailing samples feed the drift average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailWindow {
    /// Trailing fraction of the samples; 0.5 keeps the second half
    Fraction(f64),
    /// Fixed number of trailing samples
    Count(usize),
}

impl Default for TailWindow {
    fn default() -> Self {
        TailWindow::Fraction(0.5)
    }
}

impl TailWindow {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            TailWindow::Fraction(f) if !(f > 0.0 && f <= 1.0) => Err(ConfigError::InvalidWindow(
                format!("fraction must lie in (0, 1], got {f}"),
            )),
            TailWindow::Count(0) => Err(ConfigError::InvalidWindow(
                "count must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// First sample index of the window for a trajectory of `len` samples
    pub fn start_index(&self, len: usize) -> usize {
        match *self {
            TailWindow::Fraction(f) => {
                let start = (len as f64 * (1.0 - f)).floor() as usize;
                start.min(len)
            }
            TailWindow::Count(k) => len.saturating_sub(k),
        }
    }
}

/// Mean dθ/dt over the trailing window of a converged trajectory
pub fn estimate_drift(trajectory: &Trajectory, window: TailWindow) -> Result<f64, DriftError> {
    if !trajectory.converged {
        return Err(DriftError::NotConverged {
            failure: trajectory.failure,
        });
    }

    let start = window.start_index(trajectory.len());
    let times = &trajectory.times[start..];
    let phase = &trajectory.phase[start..];
    if times.len() < 2 {
        return Err(DriftError::DegenerateWindow {
            samples: times.len(),
        });
    }

    let drift = mean_increment(phase) / mean_increment(times);
    if drift.is_finite() {
        Ok(drift)
    } else {
        Err(DriftError::NonFinite)
    }
}

fn mean_increment(values: &[f64]) -> f64 {
    let sum: f64 = values.windows(2).map(|w| w[1] - w[0]).sum();
    sum / (values.len() - 1) as f64
}

/// Headline numbers of a single-point run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    /// Windowed mean dθ/dt (rad/time)
    pub drift: f64,
    /// θ at the last sample
    pub final_phase: f64,
    /// θ at the last sample folded into [0, 2π)
    pub final_phase_mod_2pi: f64,
    /// θ(end) - θ(start)
    pub accumulated_phase: f64,
}

impl PhaseSummary {
    pub fn from_trajectory(
        trajectory: &Trajectory,
        window: TailWindow,
    ) -> Result<Self, DriftError> {
        let drift = estimate_drift(trajectory, window)?;
        // estimate_drift guarantees at least two samples
        let first = trajectory.phase[0];
        let final_phase = trajectory.phase[trajectory.len() - 1];
        Ok(Self {
            drift,
            final_phase,
            final_phase_mod_2pi: final_phase.rem_euclid(TAU),
            accumulated_phase: final_phase - first,
        })
    }
}
