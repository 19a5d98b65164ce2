use serde::{Deserialize, Serialize};

use crate::error::DriftError;
use crate::model::ParameterSet;

use super::{ParameterAxis, SweepGrid};

/// Outcome of one grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftCell {
    /// Finite drift estimate (rad/time)
    Drift(f64),
    /// No value could be justified for this point
    Undefined(DriftError),
}

impl DriftCell {
    pub fn value(&self) -> Option<f64> {
        match self {
            DriftCell::Drift(v) => Some(*v),
            DriftCell::Undefined(_) => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, DriftCell::Drift(_))
    }
}

impl From<Result<f64, DriftError>> for DriftCell {
    fn from(result: Result<f64, DriftError>) -> Self {
        match result {
            Ok(v) => DriftCell::Drift(v),
            Err(e) => DriftCell::Undefined(e),
        }
    }
}

/// A located extremum of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub indices: Vec<usize>,
    pub parameters: ParameterSet,
    pub value: f64,
}

/// Completed sweep: axes, the fixed parameters, and one cell per combination.
///
/// Read-only once returned by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSweep {
    pub name: String,
    pub axes: Vec<ParameterAxis>,
    pub fixed: ParameterSet,
    pub grid: SweepGrid<DriftCell>,
}

impl DriftSweep {
    pub fn shape(&self) -> &[usize] {
        self.grid.shape()
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    pub fn get(&self, indices: &[usize]) -> Option<&DriftCell> {
        self.grid.get(indices)
    }

    /// Axis values per dimension, in grid order
    pub fn axis_values(&self) -> Vec<&[f64]> {
        self.axes.iter().map(ParameterAxis::values).collect()
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.axes.iter().map(ParameterAxis::label).collect()
    }

    /// Parameter set used at `indices`
    pub fn parameters_at(&self, indices: &[usize]) -> Option<ParameterSet> {
        if indices.len() != self.axes.len() {
            return None;
        }
        self.axes
            .iter()
            .zip(indices)
            .try_fold(self.fixed, |params, (axis, &i)| {
                axis.values().get(i).map(|&v| params.with(axis.target(), v))
            })
    }

    pub fn defined_count(&self) -> usize {
        self.grid.cells().iter().filter(|c| c.is_defined()).count()
    }

    pub fn undefined_count(&self) -> usize {
        self.grid.len() - self.defined_count()
    }

    /// Grid of optional values, `None` where undefined
    pub fn values(&self) -> SweepGrid<Option<f64>> {
        self.grid.map(DriftCell::value)
    }

    /// Defined values multiplied by `factor` (e.g. 1e-9 for Grad/s)
    pub fn scaled(&self, factor: f64) -> SweepGrid<Option<f64>> {
        self.grid.map(|c| c.value().map(|v| v * factor))
    }

    /// Largest defined drift
    pub fn max_drift(&self) -> Option<GridPoint> {
        self.extremum(|_, drift| drift)
    }

    /// Largest |drift - ω| with ω the point's own base frequency
    pub fn max_excess(&self) -> Option<GridPoint> {
        self.extremum(|params, drift| (drift - params.base_frequency).abs())
    }

    fn extremum(&self, score: impl Fn(&ParameterSet, f64) -> f64) -> Option<GridPoint> {
        let mut best: Option<GridPoint> = None;
        for (indices, cell) in self.grid.iter() {
            let Some(drift) = cell.value() else {
                continue;
            };
            let Some(parameters) = self.parameters_at(&indices) else {
                continue;
            };
            let value = score(&parameters, drift);
            if best.as_ref().is_none_or(|b| value > b.value) {
                best = Some(GridPoint {
                    indices,
                    parameters,
                    value,
                });
            }
        }
        best
    }

    pub fn summary(&self) -> SweepSummary {
        SweepSummary {
            points: self.grid.len(),
            defined: self.defined_count(),
            undefined: self.undefined_count(),
            max_drift: self.max_drift(),
            max_excess: self.max_excess(),
        }
    }
}

/// Headline statistics of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub points: usize,
    pub defined: usize,
    pub undefined: usize,
    pub max_drift: Option<GridPoint>,
    pub max_excess: Option<GridPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SweepTarget;

    fn sample() -> DriftSweep {
        let fixed = ParameterSet::new(1.0, 10.0, 1.0, 0.0);
        let axes = vec![
            ParameterAxis::from_values(SweepTarget::Coupling, vec![0.5, 1.0]),
            ParameterAxis::from_values(SweepTarget::BaseFrequency, vec![10.0, 20.0, 30.0]),
        ];
        let cells = vec![
            DriftCell::Drift(10.5),
            DriftCell::Drift(19.0),
            DriftCell::Undefined(DriftError::NonFinite),
            DriftCell::Drift(10.1),
            DriftCell::Drift(20.2),
            DriftCell::Drift(29.0),
        ];
        DriftSweep {
            name: "sample".into(),
            axes,
            fixed,
            grid: SweepGrid::from_cells(vec![2, 3], cells).unwrap(),
        }
    }

    #[test]
    fn test_parameters_at_overrides_fixed() {
        let sweep = sample();
        let params = sweep.parameters_at(&[1, 2]).unwrap();
        assert_eq!(params.coupling, 1.0);
        assert_eq!(params.base_frequency, 30.0);
        assert_eq!(params.modulation_scale, 1.0);
        assert!(sweep.parameters_at(&[2, 0]).is_none());
    }

    #[test]
    fn test_counts() {
        let sweep = sample();
        assert_eq!(sweep.defined_count(), 5);
        assert_eq!(sweep.undefined_count(), 1);
    }

    #[test]
    fn test_max_drift_skips_undefined() {
        let point = sample().max_drift().unwrap();
        assert_eq!(point.indices, vec![1, 2]);
        assert_eq!(point.value, 29.0);
    }

    #[test]
    fn test_max_excess_uses_point_frequency() {
        let point = sample().max_excess().unwrap();
        assert_eq!(point.indices, vec![0, 1]);
        assert!((point.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_keeps_holes() {
        let scaled = sample().scaled(0.5);
        assert_eq!(scaled.get(&[0, 2]), Some(&None));
        assert_eq!(scaled.get(&[0, 0]), Some(&Some(5.25)));
    }

    #[test]
    fn test_undefined_cell_serializes_as_tagged() {
        let cell = DriftCell::Undefined(DriftError::DegenerateWindow { samples: 1 });
        let json = serde_json::to_value(cell).unwrap();
        assert_eq!(json["undefined"]["kind"], "degenerate_window");
    }
}
