//! Sequential sweep driver.
//!
//! Each grid point goes pending → integrating → {estimated, undefined}
//! exactly once. Points share nothing but the output grid, and a failed
//! point only affects its own cell.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::drift::{TailWindow, estimate_drift};
use crate::error::ConfigError;
use crate::integrator::{IntegratorSettings, integrate};
use crate::model::{ParameterSet, PhaseModel, TimeSpan};

use super::{DriftCell, DriftSweep, ParameterAxis, SweepGrid};

/// Largest number of axes a sweep may declare
pub const MAX_AXES: usize = 2;

/// Everything one sweep needs besides the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRequest {
    pub name: String,
    /// One or two axes; the first varies slowest in the grid
    pub axes: Vec<ParameterAxis>,
    /// Values for every parameter no axis drives
    pub fixed: ParameterSet,
    pub time_span: TimeSpan,
    pub settings: IntegratorSettings,
    pub window: TailWindow,
}

impl SweepRequest {
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(ParameterAxis::len).collect()
    }

    pub fn total_points(&self) -> usize {
        self.shape().iter().product()
    }

    /// Reject anything that would make the sweep meaningless.
    ///
    /// Every parameter set the grid will produce is checked here, so a sweep
    /// that passes validation never stops on a configuration problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.axes.is_empty() || self.axes.len() > MAX_AXES {
            return Err(ConfigError::AxisCount(self.axes.len()));
        }

        let mut seen = HashSet::new();
        for axis in &self.axes {
            if axis.is_empty() {
                return Err(ConfigError::EmptyAxis(axis.target()));
            }
            if !seen.insert(axis.target()) {
                return Err(ConfigError::DuplicateAxis(axis.target()));
            }
        }

        self.settings.validate()?;
        self.window.validate()?;

        self.fixed.validate()?;
        for axis in &self.axes {
            for &value in axis.values() {
                self.fixed.with(axis.target(), value).validate()?;
            }
        }
        Ok(())
    }
}

/// Run `request` against `model`.
///
/// Returns `ConfigError` before integrating anything if the request is
/// malformed. Integration failures are recorded per cell.
pub fn sweep<M: PhaseModel>(model: &M, request: &SweepRequest) -> Result<DriftSweep, ConfigError> {
    request.validate()?;

    let total = request.total_points();
    let report_every = (total / 10).max(1);
    tracing::info!(
        sweep = %request.name,
        shape = ?request.shape(),
        total_points = total,
        "Starting drift sweep"
    );

    let mut done = 0;
    let grid = SweepGrid::from_fn(request.shape(), |idx| {
        let params = request
            .axes
            .iter()
            .zip(idx)
            .fold(request.fixed, |p, (axis, &i)| p.with(axis.target(), axis.values()[i]));

        let cell = evaluate_point(model, &params, request);
        if let DriftCell::Undefined(reason) = &cell {
            tracing::warn!(
                sweep = %request.name,
                indices = ?idx,
                coupling = params.coupling,
                base_frequency = params.base_frequency,
                modulation_scale = params.modulation_scale,
                %reason,
                "Grid point left undefined"
            );
        }

        done += 1;
        if done % report_every == 0 {
            tracing::debug!(sweep = %request.name, completed = done, total, "Sweep progress");
        }
        cell
    });

    let result = DriftSweep {
        name: request.name.clone(),
        axes: request.axes.clone(),
        fixed: request.fixed,
        grid,
    };
    tracing::info!(
        sweep = %request.name,
        undefined = result.undefined_count(),
        "Drift sweep finished"
    );
    Ok(result)
}

/// Integrate one parameter set and reduce it to a cell.
///
/// The trajectory is dropped before returning.
pub fn evaluate_point<M: PhaseModel>(
    model: &M,
    params: &ParameterSet,
    request: &SweepRequest,
) -> DriftCell {
    let trajectory = integrate(model, params, &request.time_span, &request.settings);
    estimate_drift(&trajectory, request.window).into()
}
